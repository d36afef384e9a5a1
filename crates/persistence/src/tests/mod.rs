// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence tests.
//!
//! All tests run against unique in-memory `SQLite` databases.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod pdf_tests;
mod report_tests;
mod user_tests;

use crate::data_models::NewBook;
use crate::Persistence;

/// Creates a fresh in-memory store.
pub(crate) fn fresh_store() -> Persistence {
    Persistence::new_in_memory().expect("failed to create in-memory store")
}

/// Seeds one committee and two departments; returns (co, de_a, de_b).
pub(crate) fn seed_architecture(store: &mut Persistence) -> (i64, i64, i64) {
    let co: i64 = store.create_committee("اللجنة الادارية").unwrap();
    let de_a: i64 = store.create_department("قسم الادارة").unwrap();
    let de_b: i64 = store.create_department("قسم المالية").unwrap();
    (co, de_a, de_b)
}

/// A minimal valid book payload.
pub(crate) fn sample_book(book_no: &str, user_id: Option<i64>) -> NewBook {
    NewBook {
        book_type: Some("خارجي".to_string()),
        book_no: Some(book_no.to_string()),
        book_date: Some("2024-01-15".to_string()),
        directory_name: Some("مكتب المدير".to_string()),
        incoming_no: Some("77".to_string()),
        incoming_date: Some("2024-01-10".to_string()),
        subject: Some("طلب اجازة اعتيادية".to_string()),
        destination: Some("بغداد".to_string()),
        book_action: Some("للاطلاع".to_string()),
        book_status: Some("قيد الانجاز".to_string()),
        notes: None,
        user_id,
        current_date: Some("2024-01-15".to_string()),
    }
}
