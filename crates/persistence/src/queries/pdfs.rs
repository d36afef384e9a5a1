// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PDF metadata queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::PdfRecord;
use crate::diesel_schema::{pdf_table, users};
use crate::error::PersistenceError;

/// Diesel row for the PDF/uploader join.
#[derive(Queryable)]
struct PdfJoinRow {
    pdf_id: i64,
    book_id: Option<i64>,
    book_no: Option<String>,
    count_pdf: Option<i32>,
    pdf: Option<String>,
    user_id: Option<i64>,
    current_date: Option<String>,
    username: Option<String>,
}

impl From<PdfJoinRow> for PdfRecord {
    fn from(row: PdfJoinRow) -> Self {
        Self {
            pdf_id: row.pdf_id,
            book_id: row.book_id,
            book_no: row.book_no,
            count_pdf: row.count_pdf,
            pdf: row.pdf,
            user_id: row.user_id,
            current_date: row.current_date,
            username: row.username,
        }
    }
}

/// The select clause matching [`PdfJoinRow`].
macro_rules! pdf_join_select {
    () => {
        (
            pdf_table::pdf_id,
            pdf_table::book_id,
            pdf_table::book_no,
            pdf_table::count_pdf,
            pdf_table::pdf,
            pdf_table::user_id,
            pdf_table::current_date,
            users::username.nullable(),
        )
    };
}

backend_fn! {
/// Counts the PDF rows linked to a book.
///
/// The next PDF's sequence number is derived from this count.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn pdf_count_for_book(conn: &mut _, book_id: i64) -> Result<i64, PersistenceError> {
    Ok(pdf_table::table
        .filter(pdf_table::book_id.eq(book_id))
        .count()
        .get_result(conn)?)
}
}

backend_fn! {
/// Lists the PDF rows for a single book number, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn pdfs_for_book_no(
    conn: &mut _,
    book_no: &str,
) -> Result<Vec<PdfRecord>, PersistenceError> {
    debug!(book_no, "Listing PDFs for book number");

    let rows: Vec<PdfJoinRow> = pdf_table::table
        .left_join(users::table)
        .filter(pdf_table::book_no.eq(book_no))
        .order(pdf_table::pdf_id.asc())
        .select(pdf_join_select!())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}

backend_fn! {
/// Lists the PDF rows for a set of book numbers, oldest first.
///
/// Used by the paginated listing to build its per-book PDF map in one
/// query.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn pdfs_for_book_nos(
    conn: &mut _,
    book_nos: &[String],
) -> Result<Vec<PdfRecord>, PersistenceError> {
    if book_nos.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<PdfJoinRow> = pdf_table::table
        .left_join(users::table)
        .filter(pdf_table::book_no.eq_any(book_nos))
        .order(pdf_table::pdf_id.asc())
        .select(pdf_join_select!())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}

backend_fn! {
/// Lists the PDF rows for a book id, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn pdfs_for_book_id(
    conn: &mut _,
    book_id: i64,
) -> Result<Vec<PdfRecord>, PersistenceError> {
    let rows: Vec<PdfJoinRow> = pdf_table::table
        .left_join(users::table)
        .filter(pdf_table::book_id.eq(book_id))
        .order(pdf_table::pdf_id.asc())
        .select(pdf_join_select!())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}

backend_fn! {
/// Retrieves one PDF row by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the row does not exist.
pub fn pdf_by_id(conn: &mut _, pdf_id: i64) -> Result<Option<PdfRecord>, PersistenceError> {
    let result: Result<PdfJoinRow, diesel::result::Error> = pdf_table::table
        .left_join(users::table)
        .filter(pdf_table::pdf_id.eq(pdf_id))
        .select(pdf_join_select!())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
