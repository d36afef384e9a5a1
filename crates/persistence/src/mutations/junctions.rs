// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Junction and bridge mutations.
//!
//! Junction rows are created lazily: the first book routed to a
//! (committee, department) pair creates the pairing. The schema carries a
//! real UNIQUE(co_id, de_id) index, so two requests racing to create the
//! same pairing resolve deterministically: the loser catches the unique
//! violation and re-queries.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{book_junction_bridge, committee_departments_junction};
use crate::error::PersistenceError;

backend_fn! {
/// Finds or creates the junction row for a (committee, department) pair.
///
/// Returns the junction id in either case. A concurrent insert of the
/// same pair is an expected, handled branch, not an error.
///
/// # Errors
///
/// Returns an error if the database operations fail for any reason
/// other than the handled unique-violation race.
pub fn get_or_create_junction(
    conn: &mut _,
    co_id: i64,
    de_id: i64,
) -> Result<i64, PersistenceError> {
    let existing: Option<i64> = committee_departments_junction::table
        .filter(committee_departments_junction::co_id.eq(co_id))
        .filter(committee_departments_junction::de_id.eq(de_id))
        .select(committee_departments_junction::junction_id)
        .first(conn)
        .optional()?;
    if let Some(junction_id) = existing {
        debug!(junction_id, co_id, de_id, "Reusing existing junction");
        return Ok(junction_id);
    }

    let inserted: Result<usize, diesel::result::Error> =
        diesel::insert_into(committee_departments_junction::table)
            .values((
                committee_departments_junction::co_id.eq(co_id),
                committee_departments_junction::de_id.eq(de_id),
            ))
            .execute(conn);

    match inserted {
        Ok(_) => {
            let junction_id: i64 = conn.get_last_insert_rowid()?;
            info!(junction_id, co_id, de_id, "Created junction");
            Ok(junction_id)
        }
        // A concurrent request created the pair first; use its row.
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            let junction_id: i64 = committee_departments_junction::table
                .filter(committee_departments_junction::co_id.eq(co_id))
                .filter(committee_departments_junction::de_id.eq(de_id))
                .select(committee_departments_junction::junction_id)
                .first(conn)?;
            debug!(junction_id, co_id, de_id, "Lost junction race; reusing winner");
            Ok(junction_id)
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Inserts a bridge row associating a book with a junction.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_bridge(
    conn: &mut _,
    book_id: i64,
    junction_id: i64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(book_junction_bridge::table)
        .values((
            book_junction_bridge::book_id.eq(book_id),
            book_junction_bridge::junction_id.eq(junction_id),
        ))
        .execute(conn)?;

    let bridge_id: i64 = conn.get_last_insert_rowid()?;
    debug!(bridge_id, book_id, junction_id, "Created bridge");
    Ok(bridge_id)
}
}

backend_fn! {
/// Deletes every bridge row for a book.
///
/// Department reassignment replaces the association set wholesale:
/// delete everything, then recreate from the requested pairs.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_bridges_for_book(conn: &mut _, book_id: i64) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(book_junction_bridge::table)
        .filter(book_junction_bridge::book_id.eq(book_id))
        .execute(conn)?;

    debug!(book_id, rows_affected, "Deleted bridges for book");
    Ok(rows_affected)
}
}
