// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Book row mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{BookChanges, NewBook};
use crate::diesel_schema::book_follow_up;
use crate::error::PersistenceError;

/// Diesel changeset for sparse book updates. `None` fields are skipped.
#[derive(AsChangeset)]
#[diesel(table_name = book_follow_up)]
struct BookChangeset<'a> {
    book_type: Option<&'a str>,
    book_no: Option<&'a str>,
    book_date: Option<&'a str>,
    directory_name: Option<&'a str>,
    incoming_no: Option<&'a str>,
    incoming_date: Option<&'a str>,
    subject: Option<&'a str>,
    destination: Option<&'a str>,
    book_action: Option<&'a str>,
    book_status: Option<&'a str>,
    notes: Option<&'a str>,
    user_id: Option<i64>,
    current_date: Option<&'a str>,
}

impl<'a> From<&'a BookChanges> for BookChangeset<'a> {
    fn from(changes: &'a BookChanges) -> Self {
        Self {
            book_type: changes.book_type.as_deref(),
            book_no: changes.book_no.as_deref(),
            book_date: changes.book_date.as_deref(),
            directory_name: changes.directory_name.as_deref(),
            incoming_no: changes.incoming_no.as_deref(),
            incoming_date: changes.incoming_date.as_deref(),
            subject: changes.subject.as_deref(),
            destination: changes.destination.as_deref(),
            book_action: changes.book_action.as_deref(),
            book_status: changes.book_status.as_deref(),
            notes: changes.notes.as_deref(),
            user_id: changes.user_id,
            current_date: changes.current_date.as_deref(),
        }
    }
}

backend_fn! {
/// Inserts a book row with its primary junction reference.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_book(
    conn: &mut _,
    book: &NewBook,
    junction_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(book_follow_up::table)
        .values((
            book_follow_up::book_type.eq(book.book_type.as_deref()),
            book_follow_up::book_no.eq(book.book_no.as_deref()),
            book_follow_up::book_date.eq(book.book_date.as_deref()),
            book_follow_up::directory_name.eq(book.directory_name.as_deref()),
            book_follow_up::incoming_no.eq(book.incoming_no.as_deref()),
            book_follow_up::incoming_date.eq(book.incoming_date.as_deref()),
            book_follow_up::subject.eq(book.subject.as_deref()),
            book_follow_up::destination.eq(book.destination.as_deref()),
            book_follow_up::book_action.eq(book.book_action.as_deref()),
            book_follow_up::book_status.eq(book.book_status.as_deref()),
            book_follow_up::notes.eq(book.notes.as_deref()),
            book_follow_up::user_id.eq(book.user_id),
            book_follow_up::current_date.eq(book.current_date.as_deref()),
            book_follow_up::junction_id.eq(junction_id),
        ))
        .execute(conn)?;

    let book_id: i64 = conn.get_last_insert_rowid()?;
    info!(book_id, "Inserted book");
    Ok(book_id)
}
}

backend_fn! {
/// Checks that a book row exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn book_exists(conn: &mut _, book_id: i64) -> Result<bool, PersistenceError> {
    let found: Option<i64> = book_follow_up::table
        .filter(book_follow_up::book_id.eq(book_id))
        .select(book_follow_up::book_id)
        .first(conn)
        .optional()?;
    Ok(found.is_some())
}
}

backend_fn! {
/// Applies sparse column changes to a book row.
///
/// Callers always stamp `current_date`, so the changeset is never
/// empty.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_book_columns(
    conn: &mut _,
    book_id: i64,
    changes: &BookChanges,
) -> Result<usize, PersistenceError> {
    let changeset: BookChangeset<'_> = changes.into();
    let rows_affected: usize = diesel::update(book_follow_up::table)
        .filter(book_follow_up::book_id.eq(book_id))
        .set(&changeset)
        .execute(conn)?;

    debug!(book_id, rows_affected, "Updated book columns");
    Ok(rows_affected)
}
}

backend_fn! {
/// Points a book at a new primary junction.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_primary_junction(
    conn: &mut _,
    book_id: i64,
    junction_id: i64,
) -> Result<(), PersistenceError> {
    diesel::update(book_follow_up::table)
        .filter(book_follow_up::book_id.eq(book_id))
        .set(book_follow_up::junction_id.eq(junction_id))
        .execute(conn)?;

    debug!(book_id, junction_id, "Set primary junction");
    Ok(())
}
}
