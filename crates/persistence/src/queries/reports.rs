// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting queries.
//!
//! Reports slice the book table two ways: finalized records filtered by
//! a `current_date` range, or draft records (`current_date IS NULL`).
//! Department/committee breakdowns are computed by the API layer from the
//! per-book association sets so a multi-department book counts once per
//! department; SQL GROUP BY cannot express that over the bridge table
//! without double-counting the book rows themselves.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{BookRecord, ReportFilters};
use crate::diesel_schema::book_follow_up;
use crate::error::PersistenceError;
use crate::queries::BookJoinRow;

backend_fn! {
/// Retrieves the report rows matching the given filters.
///
/// When `restrict_to` is present only those book ids are considered;
/// the department-scoped report variant uses this with ids resolved
/// through the bridge table.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn report_books(
    conn: &mut _,
    filters: &ReportFilters,
    restrict_to: Option<&Vec<i64>>,
) -> Result<Vec<BookRecord>, PersistenceError> {
    debug!(?filters, "Running report query");

    let mut query = book_join!()
        .select(book_join_select!())
        .order(book_follow_up::book_id.desc())
        .into_boxed();

    if let Some(t) = &filters.book_type {
        query = query.filter(book_follow_up::book_type.eq(t.as_str()));
    }
    if let Some(s) = &filters.book_status {
        query = query.filter(book_follow_up::book_status.eq(s.as_str()));
    }
    if filters.unfinished_only {
        query = query.filter(book_follow_up::current_date.is_null());
    } else {
        if filters.start_date.is_some() || filters.end_date.is_some() {
            query = query.filter(book_follow_up::current_date.is_not_null());
        }
        if let Some(start) = &filters.start_date {
            query = query.filter(book_follow_up::current_date.ge(start.as_str()));
        }
        if let Some(end) = &filters.end_date {
            query = query.filter(book_follow_up::current_date.le(end.as_str()));
        }
    }
    if let Some(ids) = restrict_to {
        query = query.filter(book_follow_up::book_id.eq_any(ids));
    }

    let rows: Vec<BookJoinRow> = query.load(conn)?;
    Ok(rows.into_iter().map(Into::into).collect())
}
}
