// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Committee, department, and junction queries.
//!
//! The junction table holds every valid (committee, department) pairing;
//! the bridge table maps books onto junctions. These queries resolve both
//! directions into name-carrying rows.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{
    CommitteeData, DepartmentAssociation, DepartmentData, JunctionData,
};
use crate::diesel_schema::{
    book_junction_bridge, committee_departments_junction, committees, departments,
};
use crate::error::PersistenceError;

backend_fn! {
/// Lists all committees, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_committees(conn: &mut _) -> Result<Vec<CommitteeData>, PersistenceError> {
    let rows: Vec<(i64, Option<String>)> = committees::table
        .order(committees::co_id.asc())
        .select((committees::co_id, committees::committee_name))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(co_id, committee_name)| CommitteeData {
            co_id,
            committee_name,
        })
        .collect())
}
}

backend_fn! {
/// Lists the departments paired with a committee, ordered by name.
///
/// Only departments reachable through junction rows count; a department
/// with no pairing to this committee is not listed.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn departments_for_committee(
    conn: &mut _,
    co_id: i64,
) -> Result<Vec<DepartmentData>, PersistenceError> {
    debug!(co_id, "Listing departments for committee");

    let rows: Vec<(i64, Option<String>)> = committee_departments_junction::table
        .inner_join(departments::table)
        .filter(committee_departments_junction::co_id.eq(co_id))
        .order(departments::department_name.asc())
        .select((departments::de_id, departments::department_name))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(de_id, department_name)| DepartmentData {
            de_id,
            department_name,
        })
        .collect())
}
}

backend_fn! {
/// Finds the junction row for a (committee, department) pair.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no such pairing exists.
pub fn find_junction(
    conn: &mut _,
    co_id: i64,
    de_id: i64,
) -> Result<Option<JunctionData>, PersistenceError> {
    let result: Result<(i64, i64, i64), diesel::result::Error> =
        committee_departments_junction::table
            .filter(committee_departments_junction::co_id.eq(co_id))
            .filter(committee_departments_junction::de_id.eq(de_id))
            .select((
                committee_departments_junction::junction_id,
                committee_departments_junction::co_id,
                committee_departments_junction::de_id,
            ))
            .first(conn);

    match result {
        Ok((junction_id, co_id, de_id)) => Ok(Some(JunctionData {
            junction_id,
            co_id,
            de_id,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Resolves the full department association set for a group of books.
///
/// One row per bridge entry, carrying committee and department names,
/// ordered by book then department name so comma-joined name strings
/// come out stable.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn associations_for_books(
    conn: &mut _,
    book_ids: &[i64],
) -> Result<Vec<DepartmentAssociation>, PersistenceError> {
    if book_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<(i64, i64, i64, Option<String>, i64, Option<String>)> =
        book_junction_bridge::table
            .inner_join(
                committee_departments_junction::table
                    .inner_join(committees::table)
                    .inner_join(departments::table),
            )
            .filter(book_junction_bridge::book_id.eq_any(book_ids))
            .order((
                book_junction_bridge::book_id.asc(),
                departments::department_name.asc(),
            ))
            .select((
                book_junction_bridge::book_id,
                committee_departments_junction::junction_id,
                committee_departments_junction::co_id,
                committees::committee_name,
                committee_departments_junction::de_id,
                departments::department_name,
            ))
            .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(book_id, junction_id, co_id, committee_name, de_id, department_name)| {
                DepartmentAssociation {
                    book_id,
                    junction_id,
                    co_id,
                    committee_name,
                    de_id,
                    department_name,
                }
            },
        )
        .collect())
}
}

backend_fn! {
/// Collects the distinct book ids associated with a committee and/or
/// department through the bridge table.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn book_ids_for_pairing(
    conn: &mut _,
    co_id: Option<i64>,
    de_id: Option<i64>,
) -> Result<Vec<i64>, PersistenceError> {
    let mut query = book_junction_bridge::table
        .inner_join(committee_departments_junction::table)
        .select(book_junction_bridge::book_id)
        .into_boxed();
    if let Some(co) = co_id {
        query = query.filter(committee_departments_junction::co_id.eq(co));
    }
    if let Some(de) = de_id {
        query = query.filter(committee_departments_junction::de_id.eq(de));
    }

    let mut ids: Vec<i64> = query.load(conn)?;
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}
}
