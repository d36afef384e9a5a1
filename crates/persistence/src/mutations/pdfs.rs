// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PDF metadata mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::NewPdf;
use crate::diesel_schema::pdf_table;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a PDF metadata row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_pdf(conn: &mut _, pdf: &NewPdf) -> Result<i64, PersistenceError> {
    diesel::insert_into(pdf_table::table)
        .values((
            pdf_table::book_id.eq(pdf.book_id),
            pdf_table::book_no.eq(pdf.book_no.as_deref()),
            pdf_table::count_pdf.eq(pdf.count_pdf),
            pdf_table::pdf.eq(pdf.pdf.as_str()),
            pdf_table::user_id.eq(pdf.user_id),
            pdf_table::current_date.eq(pdf.current_date.as_deref()),
        ))
        .execute(conn)?;

    let pdf_id: i64 = conn.get_last_insert_rowid()?;
    info!(pdf_id, book_id = pdf.book_id, "Inserted PDF row");
    Ok(pdf_id)
}
}

backend_fn! {
/// Deletes a PDF metadata row.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_pdf(conn: &mut _, pdf_id: i64) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(pdf_table::table)
        .filter(pdf_table::pdf_id.eq(pdf_id))
        .execute(conn)?;

    debug!(pdf_id, rows_affected, "Deleted PDF row");
    Ok(rows_affected)
}
}
