// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Book listing and lookup queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::collections::HashSet;
use tracing::debug;

use booktrack_domain::BookStatus;

use crate::data_models::{BookFilters, BookRecord, UserBookCount};
use crate::diesel_schema::{book_follow_up, users};
use crate::error::PersistenceError;
use crate::queries::BookJoinRow;

backend_fn! {
/// Retrieves one page of books, deduplicated by book number.
///
/// The listing shows one row per distinct book number (the newest row
/// when several share a number across years); `total` counts those
/// deduplicated entries. Rows with a NULL book number are kept
/// individually.
///
/// A narrow `(book_id, book_no)` scan drives the dedup and pagination;
/// only the page's rows are then loaded with their joins.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_filtered_books(
    conn: &mut _,
    filters: &BookFilters,
    page: i64,
    limit: i64,
) -> Result<(Vec<BookRecord>, i64), PersistenceError> {
    debug!(page, limit, "Listing filtered books");

    let mut scan = book_follow_up::table
        .select((book_follow_up::book_id, book_follow_up::book_no))
        .order(book_follow_up::book_id.desc())
        .into_boxed();
    if let Some(v) = &filters.book_no {
        scan = scan.filter(book_follow_up::book_no.eq(v.as_str()));
    }
    if let Some(v) = &filters.book_status {
        scan = scan.filter(book_follow_up::book_status.eq(v.as_str()));
    }
    if let Some(v) = &filters.book_type {
        scan = scan.filter(book_follow_up::book_type.eq(v.as_str()));
    }
    if let Some(v) = &filters.directory_name {
        scan = scan.filter(book_follow_up::directory_name.eq(v.as_str()));
    }
    if let Some(v) = &filters.subject {
        scan = scan.filter(book_follow_up::subject.eq(v.as_str()));
    }
    if let Some(v) = &filters.incoming_no {
        scan = scan.filter(book_follow_up::incoming_no.eq(v.as_str()));
    }

    let pairs: Vec<(i64, Option<String>)> = scan.load(conn)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut ids: Vec<i64> = Vec::new();
    for (id, book_no) in pairs {
        match book_no {
            Some(no) => {
                if seen.insert(no) {
                    ids.push(id);
                }
            }
            None => ids.push(id),
        }
    }
    let total: i64 = ids.len() as i64;

    let offset: usize = usize::try_from((page - 1) * limit).unwrap_or(0);
    let page_ids: Vec<i64> = ids
        .into_iter()
        .skip(offset)
        .take(usize::try_from(limit).unwrap_or(0))
        .collect();

    let rows: Vec<BookJoinRow> = book_join!()
        .filter(book_follow_up::book_id.eq_any(&page_ids))
        .order(book_follow_up::book_id.desc())
        .select(book_join_select!())
        .load(conn)?;

    Ok((rows.into_iter().map(Into::into).collect(), total))
}
}

backend_fn! {
/// Retrieves a single book with its creator and primary pairing names.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the book does not exist.
pub fn get_book(conn: &mut _, book_id: i64) -> Result<Option<BookRecord>, PersistenceError> {
    debug!(book_id, "Looking up book");

    let result: Result<BookJoinRow, diesel::result::Error> = book_join!()
        .filter(book_follow_up::book_id.eq(book_id))
        .select(book_join_select!())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves one page of late books for a user.
///
/// A late book is one whose status is still the pending value. The
/// earlier incoming-date window was dropped; only status and user
/// filter the set. Rows are ordered by incoming date, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn late_books(
    conn: &mut _,
    user_id: i64,
    page: i64,
    limit: i64,
) -> Result<(Vec<BookRecord>, i64), PersistenceError> {
    let pending_status: BookStatus = BookStatus::Pending;
    let pending: &str = pending_status.as_str();

    let total: i64 = book_follow_up::table
        .filter(book_follow_up::book_status.eq(pending))
        .filter(book_follow_up::user_id.eq(user_id))
        .count()
        .get_result(conn)?;

    let rows: Vec<BookJoinRow> = book_join!()
        .filter(book_follow_up::book_status.eq(pending))
        .filter(book_follow_up::user_id.eq(user_id))
        .order(book_follow_up::incoming_date.asc())
        .offset((page - 1) * limit)
        .limit(limit)
        .select(book_join_select!())
        .load(conn)?;

    Ok((rows.into_iter().map(Into::into).collect(), total))
}
}

backend_fn! {
/// Lists all distinct book numbers, ordered.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn distinct_book_numbers(conn: &mut _) -> Result<Vec<String>, PersistenceError> {
    let numbers: Vec<Option<String>> = book_follow_up::table
        .filter(book_follow_up::book_no.is_not_null())
        .select(book_follow_up::book_no)
        .distinct()
        .order(book_follow_up::book_no.asc())
        .load(conn)?;

    Ok(numbers.into_iter().flatten().collect())
}
}

backend_fn! {
/// Lists all distinct non-null incoming numbers, ordered.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn distinct_incoming_numbers(conn: &mut _) -> Result<Vec<String>, PersistenceError> {
    let numbers: Vec<Option<String>> = book_follow_up::table
        .filter(book_follow_up::incoming_no.is_not_null())
        .select(book_follow_up::incoming_no)
        .distinct()
        .order(book_follow_up::incoming_no.asc())
        .load(conn)?;

    Ok(numbers.into_iter().flatten().collect())
}
}

backend_fn! {
/// Lists distinct directory names matching a substring, ordered.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_directory_names(
    conn: &mut _,
    query: &str,
) -> Result<Vec<String>, PersistenceError> {
    let pattern: String = format!("%{query}%");
    let names: Vec<Option<String>> = book_follow_up::table
        .filter(book_follow_up::directory_name.is_not_null())
        .filter(book_follow_up::directory_name.like(pattern))
        .select(book_follow_up::directory_name)
        .distinct()
        .order(book_follow_up::directory_name.asc())
        .load(conn)?;

    Ok(names.into_iter().flatten().collect())
}
}

backend_fn! {
/// Checks whether a (type, number, year) combination is already taken.
///
/// Book-number uniqueness is scoped by book type and the year of the
/// book date; this is the application-level probe clients call before
/// submitting.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn book_no_exists(
    conn: &mut _,
    book_no: &str,
    book_type: &str,
    year: i32,
) -> Result<bool, PersistenceError> {
    let dates: Vec<Option<String>> = book_follow_up::table
        .filter(book_follow_up::book_no.eq(book_no))
        .filter(book_follow_up::book_type.eq(book_type))
        .select(book_follow_up::book_date)
        .load(conn)?;

    let prefix: String = format!("{year}-");
    Ok(dates.into_iter().flatten().any(|d| d.starts_with(&prefix)))
}
}

backend_fn! {
/// Lists all distinct non-null subjects.
///
/// Feeds the fuzzy stage of the subject search.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn distinct_subjects(conn: &mut _) -> Result<Vec<String>, PersistenceError> {
    let subjects: Vec<Option<String>> = book_follow_up::table
        .filter(book_follow_up::subject.is_not_null())
        .select(book_follow_up::subject)
        .distinct()
        .load(conn)?;

    Ok(subjects.into_iter().flatten().collect())
}
}

backend_fn! {
/// Retrieves all books whose subject matches exactly.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn books_by_subject(
    conn: &mut _,
    subject: &str,
) -> Result<Vec<BookRecord>, PersistenceError> {
    let rows: Vec<BookJoinRow> = book_join!()
        .filter(book_follow_up::subject.eq(subject))
        .order(book_follow_up::book_id.desc())
        .select(book_join_select!())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}

backend_fn! {
/// Retrieves all books whose subject contains any of the given words.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn books_by_subject_words(
    conn: &mut _,
    words: &[String],
) -> Result<Vec<BookRecord>, PersistenceError> {
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = book_join!()
        .select(book_join_select!())
        .order(book_follow_up::book_id.desc())
        .into_boxed();
    let mut first: bool = true;
    for word in words {
        let pattern: String = format!("%{word}%");
        query = if first {
            first = false;
            query.filter(book_follow_up::subject.like(pattern))
        } else {
            query.or_filter(book_follow_up::subject.like(pattern))
        };
    }

    let rows: Vec<BookJoinRow> = query.load(conn)?;
    Ok(rows.into_iter().map(Into::into).collect())
}
}

backend_fn! {
/// Counts books of a given type.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_books_with_type(
    conn: &mut _,
    book_type: &str,
) -> Result<i64, PersistenceError> {
    Ok(book_follow_up::table
        .filter(book_follow_up::book_type.eq(book_type))
        .count()
        .get_result(conn)?)
}
}

backend_fn! {
/// Counts books in a given status.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_books_with_status(
    conn: &mut _,
    book_status: &str,
) -> Result<i64, PersistenceError> {
    Ok(book_follow_up::table
        .filter(book_follow_up::book_status.eq(book_status))
        .count()
        .get_result(conn)?)
}
}

backend_fn! {
/// Counts books per creating user, busiest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_books_per_user(conn: &mut _) -> Result<Vec<UserBookCount>, PersistenceError> {
    use diesel::dsl::count;

    let rows: Vec<(String, i64)> = book_follow_up::table
        .inner_join(users::table)
        .group_by(users::username)
        .select((users::username, count(book_follow_up::book_id)))
        .order(count(book_follow_up::book_id).desc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(username, book_count)| UserBookCount {
            username,
            book_count,
        })
        .collect())
}
}
