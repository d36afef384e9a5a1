// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain data carriers crossing the persistence boundary.
//!
//! Queries deserialize Diesel rows into these structs; callers never see
//! Diesel types.

use serde::{Deserialize, Serialize};

/// A book row joined with its creator and primary pairing names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub book_id: i64,
    pub book_type: Option<String>,
    pub book_no: Option<String>,
    pub book_date: Option<String>,
    pub directory_name: Option<String>,
    pub incoming_no: Option<String>,
    pub incoming_date: Option<String>,
    pub subject: Option<String>,
    pub destination: Option<String>,
    pub book_action: Option<String>,
    pub book_status: Option<String>,
    pub notes: Option<String>,
    pub user_id: Option<i64>,
    pub current_date: Option<String>,
    pub junction_id: Option<i64>,
    /// Creator username via the users join.
    pub username: Option<String>,
    /// Primary committee id via the junction join.
    pub co_id: Option<i64>,
    /// Primary committee name via the junction join.
    pub committee_name: Option<String>,
    /// Primary department id via the junction join.
    pub de_id: Option<i64>,
    /// Primary department name via the junction join.
    pub department_name: Option<String>,
}

/// One (book, junction) association resolved to names.
///
/// The full set of these rows for a book is its department membership;
/// the bridge table is the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentAssociation {
    pub book_id: i64,
    pub junction_id: i64,
    pub co_id: i64,
    pub committee_name: Option<String>,
    pub de_id: i64,
    pub department_name: Option<String>,
}

/// A PDF row joined with its uploader's username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfRecord {
    pub pdf_id: i64,
    pub book_id: Option<i64>,
    pub book_no: Option<String>,
    pub count_pdf: Option<i32>,
    pub pdf: Option<String>,
    pub user_id: Option<i64>,
    pub current_date: Option<String>,
    pub username: Option<String>,
}

/// Fields for a new book row. `junction_id` is the primary pairing.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub book_type: Option<String>,
    pub book_no: Option<String>,
    pub book_date: Option<String>,
    pub directory_name: Option<String>,
    pub incoming_no: Option<String>,
    pub incoming_date: Option<String>,
    pub subject: Option<String>,
    pub destination: Option<String>,
    pub book_action: Option<String>,
    pub book_status: Option<String>,
    pub notes: Option<String>,
    pub user_id: Option<i64>,
    pub current_date: Option<String>,
}

/// Sparse column changes for a book row. `None` leaves a column alone.
#[derive(Debug, Clone, Default)]
pub struct BookChanges {
    pub book_type: Option<String>,
    pub book_no: Option<String>,
    pub book_date: Option<String>,
    pub directory_name: Option<String>,
    pub incoming_no: Option<String>,
    pub incoming_date: Option<String>,
    pub subject: Option<String>,
    pub destination: Option<String>,
    pub book_action: Option<String>,
    pub book_status: Option<String>,
    pub notes: Option<String>,
    pub user_id: Option<i64>,
    /// Updates always stamp this with today's date.
    pub current_date: Option<String>,
}

/// Fields for a new PDF row.
#[derive(Debug, Clone)]
pub struct NewPdf {
    pub book_id: i64,
    pub book_no: Option<String>,
    pub count_pdf: i32,
    pub pdf: String,
    pub user_id: Option<i64>,
    pub current_date: Option<String>,
}

/// Equality filters for the paginated listing. All optional.
#[derive(Debug, Clone, Default)]
pub struct BookFilters {
    pub book_no: Option<String>,
    pub book_status: Option<String>,
    pub book_type: Option<String>,
    pub directory_name: Option<String>,
    pub subject: Option<String>,
    pub incoming_no: Option<String>,
}

/// Filters for the reporting queries.
#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    pub book_type: Option<String>,
    pub book_status: Option<String>,
    /// Inclusive start of the `current_date` range.
    pub start_date: Option<String>,
    /// Inclusive end of the `current_date` range.
    pub end_date: Option<String>,
    /// When set, select only rows whose `current_date` is NULL
    /// (draft/open records); the date range is ignored.
    pub unfinished_only: bool,
}

/// The rows written by a book creation, for the response payload.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedBook {
    pub book_id: i64,
    pub junction_ids: Vec<i64>,
    pub bridge_ids: Vec<i64>,
    pub pdf_id: i64,
}

/// The rows written by a book update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedBook {
    pub book_id: i64,
    pub junction_ids: Vec<i64>,
    pub bridge_ids: Vec<i64>,
    pub pdf_id: Option<i64>,
}

/// A committee row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeData {
    pub co_id: i64,
    pub committee_name: Option<String>,
}

/// A department row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentData {
    pub de_id: i64,
    pub department_name: Option<String>,
}

/// A committee/department pairing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunctionData {
    pub junction_id: i64,
    pub co_id: i64,
    pub de_id: i64,
}

/// A user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub permission: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A (username, count) aggregation row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBookCount {
    pub username: String,
    pub book_count: i64,
}
