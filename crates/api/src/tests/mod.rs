// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API service tests.
//!
//! Services run against unique in-memory `SQLite` stores; tests that
//! exercise uploads get their own scratch directories.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod report_service_tests;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use booktrack_persistence::Persistence;

use crate::request_response::CreateBookInput;

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Creates a fresh in-memory store.
pub(crate) fn fresh_store() -> Persistence {
    Persistence::new_in_memory().expect("failed to create in-memory store")
}

/// Creates a unique scratch directory for one test.
pub(crate) fn scratch_dir() -> PathBuf {
    let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir: PathBuf =
        std::env::temp_dir().join(format!("booktrack-api-test-{}-{id}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

/// Seeds a committee, two departments, and a user; returns
/// (co, de_a, de_b, user).
pub(crate) fn seed_base(store: &mut Persistence) -> (i64, i64, i64, i64) {
    let co: i64 = store.create_committee("اللجنة الادارية").unwrap();
    let de_a: i64 = store.create_department("قسم الادارة").unwrap();
    let de_b: i64 = store.create_department("قسم المالية").unwrap();
    let user: i64 = store.create_user("archivist", "secret123", "user").unwrap();
    (co, de_a, de_b, user)
}

/// A complete, valid creation input.
pub(crate) fn sample_input(book_no: &str, co_id: i64, de_ids: &str, user_id: i64) -> CreateBookInput {
    CreateBookInput {
        book_no: book_no.to_string(),
        book_date: "2024-01-15".to_string(),
        book_type: "خارجي".to_string(),
        directory_name: Some("مكتب المدير".to_string()),
        incoming_no: Some("77".to_string()),
        incoming_date: Some("2024-01-10".to_string()),
        subject: Some("طلب اجازة اعتيادية".to_string()),
        destination: Some("بغداد".to_string()),
        book_action: Some("للاطلاع".to_string()),
        book_status: Some("قيد الانجاز".to_string()),
        notes: None,
        user_id,
        co_id,
        de_ids: de_ids.to_string(),
        file_bytes: b"%PDF-1.4 test".to_vec(),
        original_filename: "scan.pdf".to_string(),
    }
}
