// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting, statistics, directory groupings, and subject search.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use booktrack_domain::{BookStatus, significant_words, similarity_ratio, validate_date};
use booktrack_persistence::{BookRecord, Persistence, ReportFilters};

use crate::books::build_responses;
use crate::error::ApiError;
use crate::request_response::{
    BookResponse, CommitteeStat, CommitteeWithDepartments, DepartmentStat, ReportFiltersEcho,
    ReportWithStats,
};

/// Fuzzy subject matches must clear this similarity ratio.
const SUBJECT_MATCH_THRESHOLD: f64 = 0.8;

/// The reporting service.
pub struct ReportService;

impl ReportService {
    /// Runs the simple report: filtered rows with primary names attached.
    ///
    /// # Errors
    ///
    /// Returns a client error for malformed filter dates, an internal
    /// error for query failures.
    pub fn report(
        persistence: &mut Persistence,
        echo: &ReportFiltersEcho,
    ) -> Result<Vec<BookResponse>, ApiError> {
        let records: Vec<BookRecord> = Self::run_query(persistence, echo)?;
        build_responses(persistence, records, false, false)
    }

    /// Runs the report with per-department and per-committee statistics.
    ///
    /// A book associated with N departments contributes to each of those
    /// N department counts; committee counts likewise count a book once
    /// per distinct committee among its associations. The breakdown is
    /// computed from the per-book association sets already fetched for
    /// the listing, not a SQL GROUP BY.
    ///
    /// # Errors
    ///
    /// Returns a client error for malformed filter dates, an internal
    /// error for query failures.
    pub fn report_with_stats(
        persistence: &mut Persistence,
        echo: &ReportFiltersEcho,
    ) -> Result<ReportWithStats, ApiError> {
        let records: Vec<BookRecord> = Self::run_query(persistence, echo)?;
        let data: Vec<BookResponse> = build_responses(persistence, records, true, false)?;

        let mut department_counts: HashMap<i64, (Option<String>, i64)> = HashMap::new();
        let mut committee_counts: HashMap<i64, (Option<String>, i64)> = HashMap::new();
        for row in &data {
            let mut seen_departments: HashSet<i64> = HashSet::new();
            let mut seen_committees: HashSet<i64> = HashSet::new();
            for dept in &row.all_departments {
                if seen_departments.insert(dept.de_id) {
                    let entry = department_counts
                        .entry(dept.de_id)
                        .or_insert_with(|| (dept.department_name.clone(), 0));
                    entry.1 += 1;
                }
                if seen_committees.insert(dept.co_id) {
                    let entry = committee_counts
                        .entry(dept.co_id)
                        .or_insert_with(|| (dept.committee_name.clone(), 0));
                    entry.1 += 1;
                }
            }
        }

        let mut department_stats: Vec<DepartmentStat> = department_counts
            .into_iter()
            .map(|(de_id, (department_name, count))| DepartmentStat {
                de_id,
                department_name,
                count,
            })
            .collect();
        department_stats.sort_by(|a, b| b.count.cmp(&a.count).then(a.de_id.cmp(&b.de_id)));

        let mut committee_stats: Vec<CommitteeStat> = committee_counts
            .into_iter()
            .map(|(co_id, (committee_name, count))| CommitteeStat {
                co_id,
                committee_name,
                count,
            })
            .collect();
        committee_stats.sort_by(|a, b| b.count.cmp(&a.count).then(a.co_id.cmp(&b.co_id)));

        let total_records: i64 = data.len() as i64;
        Ok(ReportWithStats {
            data,
            total_records,
            department_stats,
            committee_stats,
            filters: echo.clone(),
        })
    }

    /// Groups the filtered report set as committees with nested
    /// departments and per-department book counts.
    ///
    /// # Errors
    ///
    /// Returns a client error for malformed filter dates, an internal
    /// error for query failures.
    pub fn committees_with_departments(
        persistence: &mut Persistence,
        echo: &ReportFiltersEcho,
    ) -> Result<Vec<CommitteeWithDepartments>, ApiError> {
        let stats: ReportWithStats = Self::report_with_stats(persistence, echo)?;

        // committee id -> (name, department id -> stat, distinct books)
        let mut grouped: HashMap<i64, (Option<String>, HashMap<i64, DepartmentStat>, HashSet<i64>)> =
            HashMap::new();
        for row in &stats.data {
            for dept in &row.all_departments {
                let entry = grouped
                    .entry(dept.co_id)
                    .or_insert_with(|| (dept.committee_name.clone(), HashMap::new(), HashSet::new()));
                entry.2.insert(row.id);
                let dept_entry = entry.1.entry(dept.de_id).or_insert_with(|| DepartmentStat {
                    de_id: dept.de_id,
                    department_name: dept.department_name.clone(),
                    count: 0,
                });
                dept_entry.count += 1;
            }
        }

        let mut committees: Vec<CommitteeWithDepartments> = grouped
            .into_iter()
            .map(|(co_id, (committee_name, departments, books))| {
                let mut departments: Vec<DepartmentStat> = departments.into_values().collect();
                departments.sort_by(|a, b| a.de_id.cmp(&b.de_id));
                CommitteeWithDepartments {
                    co_id,
                    committee_name,
                    departments,
                    total_books: books.len() as i64,
                }
            })
            .collect();
        committees.sort_by(|a, b| a.co_id.cmp(&b.co_id));
        Ok(committees)
    }

    /// Resolves a subject search through the three-stage strategy.
    ///
    /// Exact match first; then the best fuzzy match over all distinct
    /// subjects (similarity ratio above 0.8); finally an OR-substring
    /// match over the significant words. The first stage with hits
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no strategy yields a match, and a
    /// client error for an empty subject.
    pub fn search_by_subject(
        persistence: &mut Persistence,
        subject: &str,
    ) -> Result<Vec<BookResponse>, ApiError> {
        let subject: &str = subject.trim();
        if subject.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("subject"),
                message: String::from("Subject must not be empty"),
            });
        }

        let mut records: Vec<BookRecord> = persistence.books_by_subject(subject)?;

        if records.is_empty() {
            let candidates: Vec<String> = persistence.distinct_subjects()?;
            let best: Option<(String, f64)> = candidates
                .into_iter()
                .map(|candidate| {
                    let ratio: f64 = similarity_ratio(subject, &candidate);
                    (candidate, ratio)
                })
                .filter(|(_, ratio)| *ratio > SUBJECT_MATCH_THRESHOLD)
                .max_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((matched, ratio)) = best {
                debug!(%matched, ratio, "Fuzzy subject match");
                records = persistence.books_by_subject(&matched)?;
            }
        }

        if records.is_empty() {
            let words: Vec<String> = significant_words(subject);
            records = persistence.books_by_subject_words(&words)?;
        }

        if records.is_empty() {
            return Err(ApiError::ResourceNotFound {
                resource_type: String::from("Book"),
                message: format!("No books match subject '{subject}'"),
            });
        }

        build_responses(persistence, records, true, true)
    }

    /// Validates the echo filters and runs the underlying report query.
    fn run_query(
        persistence: &mut Persistence,
        echo: &ReportFiltersEcho,
    ) -> Result<Vec<BookRecord>, ApiError> {
        if let Some(d) = &echo.start_date {
            validate_date(d)?;
        }
        if let Some(d) = &echo.end_date {
            validate_date(d)?;
        }

        let filters: ReportFilters = ReportFilters {
            book_type: echo
                .book_type
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            book_status: echo
                .book_status
                .as_deref()
                .map(BookStatus::normalize)
                .filter(|s| !s.is_empty()),
            start_date: echo.start_date.clone(),
            end_date: echo.end_date.clone(),
            unfinished_only: echo.unfinished_only,
        };

        let restrict_to: Option<Vec<i64>> = if echo.co_id.is_none() && echo.de_id.is_none() {
            None
        } else {
            Some(persistence.book_ids_for_pairing(echo.co_id, echo.de_id)?)
        };

        Ok(persistence.report_books(&filters, restrict_to.as_ref())?)
    }
}
