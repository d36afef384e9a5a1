// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{fresh_store, sample_book, seed_architecture};
use crate::data_models::{CreatedBook, NewPdf};
use crate::Persistence;

#[test]
fn pdf_rows_group_by_book_number() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _) = seed_architecture(&mut store);
    let created: CreatedBook = store
        .create_book(&sample_book("88", None), co, &[de_a], "/88-1.pdf", "2024-01-15")
        .unwrap();
    store
        .insert_pdf(&NewPdf {
            book_id: created.book_id,
            book_no: Some("88".to_string()),
            count_pdf: 1,
            pdf: "/88-2.pdf".to_string(),
            user_id: None,
            current_date: Some("2024-01-16".to_string()),
        })
        .unwrap();

    let pdfs = store.pdfs_for_book_no("88").unwrap();
    assert_eq!(pdfs.len(), 2);
    // Oldest first.
    assert_eq!(pdfs[0].pdf.as_deref(), Some("/88-1.pdf"));
    assert_eq!(pdfs[1].pdf.as_deref(), Some("/88-2.pdf"));

    assert!(store.pdfs_for_book_no("89").unwrap().is_empty());
}

#[test]
fn pdf_map_query_covers_multiple_book_numbers() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _) = seed_architecture(&mut store);
    store
        .create_book(&sample_book("1", None), co, &[de_a], "/1.pdf", "2024-01-15")
        .unwrap();
    store
        .create_book(&sample_book("2", None), co, &[de_a], "/2.pdf", "2024-01-15")
        .unwrap();

    let pdfs = store
        .pdfs_for_book_nos(&["1".to_string(), "2".to_string()])
        .unwrap();
    assert_eq!(pdfs.len(), 2);

    assert!(store.pdfs_for_book_nos(&[]).unwrap().is_empty());
}

#[test]
fn pdf_uploader_username_is_joined() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _) = seed_architecture(&mut store);
    let user_id: i64 = store.create_user("scanner", "secret123", "user").unwrap();
    store
        .create_book(
            &sample_book("7", Some(user_id)),
            co,
            &[de_a],
            "/7.pdf",
            "2024-01-15",
        )
        .unwrap();

    let pdfs = store.pdfs_for_book_no("7").unwrap();
    assert_eq!(pdfs[0].username.as_deref(), Some("scanner"));
}

#[test]
fn deleting_a_pdf_removes_only_that_row() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _) = seed_architecture(&mut store);
    let created: CreatedBook = store
        .create_book(&sample_book("3", None), co, &[de_a], "/3-1.pdf", "2024-01-15")
        .unwrap();
    let second: i64 = store
        .insert_pdf(&NewPdf {
            book_id: created.book_id,
            book_no: Some("3".to_string()),
            count_pdf: 1,
            pdf: "/3-2.pdf".to_string(),
            user_id: None,
            current_date: None,
        })
        .unwrap();

    assert_eq!(store.delete_pdf(second).unwrap(), 1);
    let remaining = store.pdfs_for_book_id(created.book_id).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].pdf_id, created.pdf_id);

    // Deleting an absent row affects nothing.
    assert_eq!(store.delete_pdf(second).unwrap(), 0);
}

#[test]
fn pdf_lookup_by_id() {
    let mut store: Persistence = fresh_store();
    let (co, de_a, _) = seed_architecture(&mut store);
    let created: CreatedBook = store
        .create_book(&sample_book("4", None), co, &[de_a], "/4.pdf", "2024-01-15")
        .unwrap();

    let pdf = store.pdf_by_id(created.pdf_id).unwrap().unwrap();
    assert_eq!(pdf.book_id, Some(created.book_id));
    assert!(store.pdf_by_id(99_999).unwrap().is_none());
}
