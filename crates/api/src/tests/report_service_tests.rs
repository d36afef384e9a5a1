// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{fresh_store, seed_base};
use crate::error::ApiError;
use crate::reports::ReportService;
use crate::request_response::ReportFiltersEcho;
use booktrack_persistence::{NewBook, Persistence};

/// Seeds directly through the persistence adapter; reports never touch
/// the filesystem.
fn seed_book(
    store: &mut Persistence,
    book_no: &str,
    subject: &str,
    current_date: Option<&str>,
    co: i64,
    de_ids: &[i64],
) -> i64 {
    let book: NewBook = NewBook {
        book_type: Some("خارجي".to_string()),
        book_no: Some(book_no.to_string()),
        book_date: Some("2024-01-15".to_string()),
        subject: Some(subject.to_string()),
        book_status: Some("قيد الانجاز".to_string()),
        current_date: current_date.map(ToString::to_string),
        ..NewBook::default()
    };
    store
        .create_book(&book, co, de_ids, &format!("/pdfs/{book_no}.pdf"), "2024-01-15")
        .unwrap()
        .book_id
}

#[test]
fn multi_department_books_count_once_per_department() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, de_b, _) = seed_base(&mut store);
    seed_book(&mut store, "1", "كتاب شكر", Some("2024-02-01"), co, &[de_a, de_b]);
    seed_book(&mut store, "2", "تعميم", Some("2024-02-02"), co, &[de_a]);

    let stats = ReportService::report_with_stats(&mut store, &ReportFiltersEcho::default())
        .unwrap();
    assert_eq!(stats.total_records, 2);

    let dept_a = stats
        .department_stats
        .iter()
        .find(|d| d.de_id == de_a)
        .unwrap();
    let dept_b = stats
        .department_stats
        .iter()
        .find(|d| d.de_id == de_b)
        .unwrap();
    assert_eq!(dept_a.count, 2);
    assert_eq!(dept_b.count, 1);

    // One committee covers both books, counted once per book.
    assert_eq!(stats.committee_stats.len(), 1);
    assert_eq!(stats.committee_stats[0].co_id, co);
    assert_eq!(stats.committee_stats[0].count, 2);
}

#[test]
fn date_range_and_draft_modes_partition_the_set() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _, _) = seed_base(&mut store);
    let finalized: i64 = seed_book(&mut store, "1", "س", Some("2024-02-01"), co, &[de_a]);
    let draft: i64 = seed_book(&mut store, "2", "ص", None, co, &[de_a]);

    let ranged = ReportService::report(
        &mut store,
        &ReportFiltersEcho {
            start_date: Some("2024-02-01".to_string()),
            end_date: Some("2024-02-28".to_string()),
            ..ReportFiltersEcho::default()
        },
    )
    .unwrap();
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].id, finalized);

    let drafts = ReportService::report(
        &mut store,
        &ReportFiltersEcho {
            unfinished_only: true,
            ..ReportFiltersEcho::default()
        },
    )
    .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, draft);
}

#[test]
fn department_scoped_report_restricts_through_bridges() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, de_b, _) = seed_base(&mut store);
    seed_book(&mut store, "1", "س", Some("2024-02-01"), co, &[de_a]);
    let in_b: i64 = seed_book(&mut store, "2", "ص", Some("2024-02-02"), co, &[de_b]);

    let rows = ReportService::report(
        &mut store,
        &ReportFiltersEcho {
            de_id: Some(de_b),
            ..ReportFiltersEcho::default()
        },
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, in_b);
}

#[test]
fn committees_with_departments_groups_and_counts() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, de_b, _) = seed_base(&mut store);
    seed_book(&mut store, "1", "س", Some("2024-02-01"), co, &[de_a, de_b]);
    seed_book(&mut store, "2", "ص", Some("2024-02-02"), co, &[de_a]);

    let grouped = ReportService::committees_with_departments(
        &mut store,
        &ReportFiltersEcho::default(),
    )
    .unwrap();
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].co_id, co);
    assert_eq!(grouped[0].total_books, 2);
    assert_eq!(grouped[0].departments.len(), 2);
}

#[test]
fn bad_report_dates_are_client_errors() {
    let mut store: Persistence = fresh_store();
    seed_base(&mut store);

    let err: ApiError = ReportService::report(
        &mut store,
        &ReportFiltersEcho {
            start_date: Some("01/02/2024".to_string()),
            ..ReportFiltersEcho::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn subject_search_prefers_exact_matches() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _, _) = seed_base(&mut store);
    seed_book(&mut store, "1", "طلب اجازة اعتيادية", Some("2024-02-01"), co, &[de_a]);
    seed_book(&mut store, "2", "طلب اجازة مرضية", Some("2024-02-02"), co, &[de_a]);

    let rows = ReportService::search_by_subject(&mut store, "طلب اجازة اعتيادية").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].subject.as_deref(), Some("طلب اجازة اعتيادية"));
}

#[test]
fn subject_search_falls_back_to_fuzzy() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _, _) = seed_base(&mut store);
    seed_book(&mut store, "1", "طلب اجازة اعتيادية", Some("2024-02-01"), co, &[de_a]);

    // One character off; no exact match, but well above the 0.8 ratio.
    let rows = ReportService::search_by_subject(&mut store, "طلب اجازه اعتيادية").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].subject.as_deref(), Some("طلب اجازة اعتيادية"));
}

#[test]
fn subject_search_falls_back_to_significant_words() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _, _) = seed_base(&mut store);
    seed_book(
        &mut store,
        "1",
        "تعميم اوامر ادارية جديدة",
        Some("2024-02-01"),
        co,
        &[de_a],
    );

    // Far from fuzzy range, but shares the significant word "اوامر".
    let rows = ReportService::search_by_subject(&mut store, "بخصوص اوامر").unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn subject_search_misses_are_not_found() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _, _) = seed_base(&mut store);
    seed_book(&mut store, "1", "كتاب شكر", Some("2024-02-01"), co, &[de_a]);

    let err: ApiError =
        ReportService::search_by_subject(&mut store, "xyzxyzxyz").unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn empty_subject_is_a_client_error() {
    let mut store: Persistence = fresh_store();
    seed_base(&mut store);

    let err: ApiError = ReportService::search_by_subject(&mut store, "   ").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}
