// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Committee and department mutations.
//!
//! The organizational tables are administered out-of-band (there is no
//! public endpoint that writes them); these mutations exist for seeding
//! and tooling.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{committees, departments};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a committee.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_committee(conn: &mut _, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(committees::table)
        .values(committees::committee_name.eq(name))
        .execute(conn)?;

    let co_id: i64 = conn.get_last_insert_rowid()?;
    info!(co_id, name, "Created committee");
    Ok(co_id)
}
}

backend_fn! {
/// Creates a department.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_department(conn: &mut _, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(departments::table)
        .values(departments::department_name.eq(name))
        .execute(conn)?;

    let de_id: i64 = conn.get_last_insert_rowid()?;
    info!(de_id, name, "Created department");
    Ok(de_id)
}
}
