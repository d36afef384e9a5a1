// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary validation helpers.
//!
//! All validation runs before any write is issued. Dates are carried as
//! `YYYY-MM-DD` strings throughout the system; the store holds them as
//! text.

use chrono::NaiveDate;

use crate::error::DomainError;

/// The date format used everywhere in the system.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a comma-separated department-id list.
///
/// Entries are trimmed; empty entries are skipped so trailing commas are
/// tolerated. Duplicate ids are collapsed, preserving first-seen order,
/// so a repeated department never produces a duplicate bridge row.
///
/// # Errors
///
/// Returns `DomainError::InvalidDepartmentIds` if any entry is not an
/// integer, and `DomainError::EmptyDepartmentIds` if nothing remains
/// after parsing.
pub fn parse_department_ids(raw: &str) -> Result<Vec<i64>, DomainError> {
    let mut ids: Vec<i64> = Vec::new();
    for entry in raw.split(',') {
        let entry: &str = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let id: i64 = entry
            .parse()
            .map_err(|_| DomainError::InvalidDepartmentIds {
                value: raw.to_string(),
            })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return Err(DomainError::EmptyDepartmentIds);
    }
    Ok(ids)
}

/// Validates that a string is a well-formed `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` on any parse failure.
pub fn validate_date(value: &str) -> Result<(), DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| DomainError::InvalidDate {
            value: value.to_string(),
        })
}

/// Extracts the year component of a `YYYY-MM-DD` date string.
///
/// Book-number uniqueness is scoped by (type, number, year), and the PDF
/// filename scheme embeds this year.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string is not a valid date.
pub fn year_of_date(value: &str) -> Result<i32, DomainError> {
    use chrono::Datelike;

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|d| d.year())
        .map_err(|_| DomainError::InvalidDate {
            value: value.to_string(),
        })
}
