// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{fresh_store, sample_book, seed_architecture};
use crate::data_models::{NewBook, ReportFilters};
use crate::Persistence;

/// Seeds three books: one finalized in January, one in March, one draft
/// (NULL `current_date`). Returns their ids in that order.
fn seed_report_data(store: &mut Persistence) -> (i64, i64, i64, i64, i64) {
    let (co, de_a, de_b) = seed_architecture(store);

    let mut january: NewBook = sample_book("r1", None);
    january.current_date = Some("2024-01-20".to_string());
    let jan_id: i64 = store
        .create_book(&january, co, &[de_a], "/r1.pdf", "2024-01-20")
        .unwrap()
        .book_id;

    let mut march: NewBook = sample_book("r2", None);
    march.current_date = Some("2024-03-05".to_string());
    march.book_status = Some("انجزت".to_string());
    let mar_id: i64 = store
        .create_book(&march, co, &[de_a, de_b], "/r2.pdf", "2024-03-05")
        .unwrap()
        .book_id;

    let mut draft: NewBook = sample_book("r3", None);
    draft.current_date = None;
    let draft_id: i64 = store
        .create_book(&draft, co, &[de_b], "/r3.pdf", "2024-03-06")
        .unwrap()
        .book_id;

    (jan_id, mar_id, draft_id, de_a, de_b)
}

#[test]
fn date_range_selects_only_finalized_rows_in_range() {
    let mut store: Persistence = fresh_store();
    let (jan_id, _, _, _, _) = seed_report_data(&mut store);

    let filters: ReportFilters = ReportFilters {
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-01-31".to_string()),
        ..ReportFilters::default()
    };
    let rows = store.report_books(&filters, None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].book_id, jan_id);
}

#[test]
fn unfinished_only_selects_null_current_date() {
    let mut store: Persistence = fresh_store();
    let (_, _, draft_id, _, _) = seed_report_data(&mut store);

    let filters: ReportFilters = ReportFilters {
        unfinished_only: true,
        ..ReportFilters::default()
    };
    let rows = store.report_books(&filters, None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].book_id, draft_id);
    assert!(rows[0].current_date.is_none());
}

#[test]
fn status_filter_composes_with_the_range() {
    let mut store: Persistence = fresh_store();
    let (_, mar_id, _, _, _) = seed_report_data(&mut store);

    let filters: ReportFilters = ReportFilters {
        book_status: Some("انجزت".to_string()),
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-12-31".to_string()),
        ..ReportFilters::default()
    };
    let rows = store.report_books(&filters, None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].book_id, mar_id);
}

#[test]
fn pairing_restriction_goes_through_the_bridge_table() {
    let mut store: Persistence = fresh_store();
    let (jan_id, mar_id, draft_id, de_a, de_b) = seed_report_data(&mut store);

    let ids_a: Vec<i64> = store.book_ids_for_pairing(None, Some(de_a)).unwrap();
    assert!(ids_a.contains(&jan_id));
    assert!(ids_a.contains(&mar_id));
    assert!(!ids_a.contains(&draft_id));

    let ids_b: Vec<i64> = store.book_ids_for_pairing(None, Some(de_b)).unwrap();
    assert!(ids_b.contains(&mar_id));
    assert!(ids_b.contains(&draft_id));

    // Restricting the report by the de_b set drops the January book.
    let filters: ReportFilters = ReportFilters::default();
    let rows = store.report_books(&filters, Some(&ids_b)).unwrap();
    let row_ids: Vec<i64> = rows.iter().map(|r| r.book_id).collect();
    assert!(!row_ids.contains(&jan_id));
    assert!(row_ids.contains(&mar_id));
    assert!(row_ids.contains(&draft_id));
}
