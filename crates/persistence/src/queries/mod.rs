// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic queries.
//!
//! All queries use Diesel DSL and work across all supported database
//! backends. The shared `book_join!`/`book_join_select!` macros expand to
//! the canonical book listing source: the book table left-joined to its
//! creator and, through the primary junction, to the committee and
//! department name tables.

/// The canonical joined source for book listing queries.
macro_rules! book_join {
    () => {
        crate::diesel_schema::book_follow_up::table
            .left_join(crate::diesel_schema::users::table)
            .left_join(
                crate::diesel_schema::committee_departments_junction::table
                    .left_join(crate::diesel_schema::committees::table)
                    .left_join(crate::diesel_schema::departments::table),
            )
    };
}

/// The select clause matching [`BookJoinRow`].
macro_rules! book_join_select {
    () => {
        (
            crate::diesel_schema::book_follow_up::book_id,
            crate::diesel_schema::book_follow_up::book_type,
            crate::diesel_schema::book_follow_up::book_no,
            crate::diesel_schema::book_follow_up::book_date,
            crate::diesel_schema::book_follow_up::directory_name,
            crate::diesel_schema::book_follow_up::incoming_no,
            crate::diesel_schema::book_follow_up::incoming_date,
            crate::diesel_schema::book_follow_up::subject,
            crate::diesel_schema::book_follow_up::destination,
            crate::diesel_schema::book_follow_up::book_action,
            crate::diesel_schema::book_follow_up::book_status,
            crate::diesel_schema::book_follow_up::notes,
            crate::diesel_schema::book_follow_up::user_id,
            crate::diesel_schema::book_follow_up::current_date,
            crate::diesel_schema::book_follow_up::junction_id,
            crate::diesel_schema::users::username.nullable(),
            crate::diesel_schema::committees::co_id.nullable(),
            crate::diesel_schema::committees::committee_name.nullable(),
            crate::diesel_schema::departments::de_id.nullable(),
            crate::diesel_schema::departments::department_name.nullable(),
        )
    };
}

pub mod architecture;
pub mod books;
pub mod pdfs;
pub mod reports;
pub mod users;

use crate::data_models::BookRecord;

/// Diesel row for the canonical book join.
#[derive(diesel::Queryable)]
pub(crate) struct BookJoinRow {
    book_id: i64,
    book_type: Option<String>,
    book_no: Option<String>,
    book_date: Option<String>,
    directory_name: Option<String>,
    incoming_no: Option<String>,
    incoming_date: Option<String>,
    subject: Option<String>,
    destination: Option<String>,
    book_action: Option<String>,
    book_status: Option<String>,
    notes: Option<String>,
    user_id: Option<i64>,
    current_date: Option<String>,
    junction_id: Option<i64>,
    username: Option<String>,
    co_id: Option<i64>,
    committee_name: Option<String>,
    de_id: Option<i64>,
    department_name: Option<String>,
}

impl From<BookJoinRow> for BookRecord {
    fn from(row: BookJoinRow) -> Self {
        Self {
            book_id: row.book_id,
            book_type: row.book_type,
            book_no: row.book_no,
            book_date: row.book_date,
            directory_name: row.directory_name,
            incoming_no: row.incoming_no,
            incoming_date: row.incoming_date,
            subject: row.subject,
            destination: row.destination,
            book_action: row.book_action,
            book_status: row.book_status,
            notes: row.notes,
            user_id: row.user_id,
            current_date: row.current_date,
            junction_id: row.junction_id,
            username: row.username,
            co_id: row.co_id,
            committee_name: row.committee_name,
            de_id: row.de_id,
            department_name: row.department_name,
        }
    }
}
