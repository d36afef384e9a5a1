// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response structures crossing the API boundary.
//!
//! Serde renames pin the wire field names the existing frontend expects:
//! book fields are camelCase (`bookNo`, `totalPages`), the committee name
//! travels as `Com`, and the multi-department fields keep their original
//! snake_case (`all_departments`, `department_names`, `department_count`).

use serde::{Deserialize, Serialize};

/// One department association in a book response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentInfo {
    #[serde(rename = "deID")]
    pub de_id: i64,
    #[serde(rename = "departmentName")]
    pub department_name: Option<String>,
    #[serde(rename = "coID")]
    pub co_id: i64,
    #[serde(rename = "Com")]
    pub committee_name: Option<String>,
}

/// One PDF entry in a book response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfFileResponse {
    pub id: i64,
    #[serde(rename = "bookNo")]
    pub book_no: Option<String>,
    pub pdf: Option<String>,
    #[serde(rename = "currentDate")]
    pub current_date: Option<String>,
    pub username: Option<String>,
}

/// A book row as served by the listing, report, and lookup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    #[serde(rename = "bookType")]
    pub book_type: Option<String>,
    #[serde(rename = "bookNo")]
    pub book_no: Option<String>,
    #[serde(rename = "bookDate")]
    pub book_date: Option<String>,
    #[serde(rename = "directoryName")]
    pub directory_name: Option<String>,
    #[serde(rename = "incomingNo")]
    pub incoming_no: Option<String>,
    #[serde(rename = "incomingDate")]
    pub incoming_date: Option<String>,
    pub subject: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "bookAction")]
    pub book_action: Option<String>,
    #[serde(rename = "bookStatus")]
    pub book_status: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "currentDate")]
    pub current_date: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
    pub username: Option<String>,
    #[serde(rename = "junctionID", skip_serializing_if = "Option::is_none")]
    pub junction_id: Option<i64>,
    #[serde(rename = "coID")]
    pub co_id: Option<i64>,
    #[serde(rename = "Com")]
    pub committee_name: Option<String>,
    #[serde(rename = "deID")]
    pub de_id: Option<i64>,
    #[serde(rename = "departmentName")]
    pub department_name: Option<String>,
    pub all_departments: Vec<DepartmentInfo>,
    pub department_names: Option<String>,
    pub department_count: i64,
    #[serde(rename = "countOfLateBooks", skip_serializing_if = "Option::is_none")]
    pub count_of_late_books: Option<i64>,
    #[serde(rename = "countOfPDFs", skip_serializing_if = "Option::is_none")]
    pub count_of_pdfs: Option<i64>,
    #[serde(rename = "pdfFiles")]
    pub pdf_files: Vec<PdfFileResponse>,
}

/// Paginated listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedBooks {
    pub data: Vec<BookResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// Everything needed to create a book with its first PDF.
///
/// The HTTP layer assembles this from the multipart form.
#[derive(Debug, Clone)]
pub struct CreateBookInput {
    pub book_no: String,
    pub book_date: String,
    pub book_type: String,
    pub directory_name: Option<String>,
    pub incoming_no: Option<String>,
    pub incoming_date: Option<String>,
    pub subject: Option<String>,
    pub destination: Option<String>,
    pub book_action: Option<String>,
    pub book_status: Option<String>,
    pub notes: Option<String>,
    pub user_id: i64,
    pub co_id: i64,
    /// Comma-separated department ids, as submitted.
    pub de_ids: String,
    pub file_bytes: Vec<u8>,
    pub original_filename: String,
}

/// Response for book creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookResponse {
    pub message: String,
    #[serde(rename = "bookID")]
    pub book_id: i64,
    pub junction_ids: Vec<i64>,
    pub bridge_ids: Vec<i64>,
}

/// Response for book update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookResponse {
    pub message: String,
    #[serde(rename = "bookID")]
    pub book_id: i64,
}

/// Response for the book-number existence probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Dashboard counts by book type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookTypeCounts {
    #[serde(rename = "External")]
    pub external: i64,
    #[serde(rename = "Internal")]
    pub internal: i64,
    #[serde(rename = "Fax")]
    pub fax: i64,
}

/// Dashboard counts by book status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookStatusCounts {
    #[serde(rename = "Accomplished")]
    pub accomplished: i64,
    #[serde(rename = "Pending")]
    pub pending: i64,
    #[serde(rename = "Deliberation")]
    pub deliberation: i64,
}

/// Dashboard per-user book counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBookCountResponse {
    pub username: String,
    #[serde(rename = "bookCount")]
    pub book_count: i64,
}

/// A committee row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeResponse {
    #[serde(rename = "coID")]
    pub co_id: i64,
    #[serde(rename = "Com")]
    pub committee_name: Option<String>,
}

/// A department row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentResponse {
    #[serde(rename = "deID")]
    pub de_id: i64,
    #[serde(rename = "departmentName")]
    pub department_name: Option<String>,
}

/// Per-department book count in report statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentStat {
    #[serde(rename = "deID")]
    pub de_id: i64,
    #[serde(rename = "departmentName")]
    pub department_name: Option<String>,
    pub count: i64,
}

/// Per-committee book count in report statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeStat {
    #[serde(rename = "coID")]
    pub co_id: i64,
    #[serde(rename = "Com")]
    pub committee_name: Option<String>,
    pub count: i64,
}

/// The filters a statistics report was run with, echoed back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFiltersEcho {
    #[serde(rename = "bookType")]
    pub book_type: Option<String>,
    #[serde(rename = "bookStatus")]
    pub book_status: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "unfinishedOnly")]
    pub unfinished_only: bool,
    #[serde(rename = "coID")]
    pub co_id: Option<i64>,
    #[serde(rename = "deID")]
    pub de_id: Option<i64>,
}

/// Report rows plus aggregate statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportWithStats {
    pub data: Vec<BookResponse>,
    #[serde(rename = "totalRecords")]
    pub total_records: i64,
    pub department_stats: Vec<DepartmentStat>,
    pub committee_stats: Vec<CommitteeStat>,
    pub filters: ReportFiltersEcho,
}

/// A committee with its nested departments, as returned by the grouped
/// directory endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeWithDepartments {
    #[serde(rename = "coID")]
    pub co_id: i64,
    #[serde(rename = "Com")]
    pub committee_name: Option<String>,
    pub departments: Vec<DepartmentStat>,
    #[serde(rename = "totalBooks")]
    pub total_books: i64,
}

/// Subject search request body.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectSearchRequest {
    pub subject: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Defaults to "user" when absent.
    pub permission: Option<String>,
}

/// Auth endpoints' minimal acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
}

/// Generic acknowledgement for destructive operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// The current session's user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: i64,
    pub username: String,
    pub permission: String,
}

/// PDF deletion request body.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletePdfRequest {
    pub id: i64,
    /// The stored path of the backing file.
    pub pdf: String,
}
