// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{BookStatus, BookType};

#[test]
fn book_type_round_trips_known_values() {
    for raw in ["خارجي", "داخلي", "فاكس", "سري"] {
        let parsed: BookType = BookType::parse(raw);
        assert_eq!(parsed.as_str(), raw);
        assert!(!matches!(parsed, BookType::Unrecognized(_)));
    }
}

#[test]
fn book_type_trims_whitespace() {
    assert_eq!(BookType::parse("  سري "), BookType::Secret);
}

#[test]
fn only_secret_books_are_secret() {
    assert!(BookType::parse("سري").is_secret());
    assert!(!BookType::parse("خارجي").is_secret());
    assert!(!BookType::parse("anything else").is_secret());
}

#[test]
fn unknown_book_type_is_preserved() {
    let parsed: BookType = BookType::parse("تعميم");
    assert_eq!(parsed, BookType::Unrecognized("تعميم".to_string()));
    assert_eq!(parsed.as_str(), "تعميم");
}

#[test]
fn book_status_round_trips_known_values() {
    for raw in ["انجزت", "قيد الانجاز", "مداولة"] {
        let parsed: BookStatus = BookStatus::parse(raw);
        assert_eq!(parsed.as_str(), raw);
        assert!(!matches!(parsed, BookStatus::Unrecognized(_)));
    }
}

#[test]
fn status_normalization_trims() {
    assert_eq!(BookStatus::normalize(" قيد الانجاز  "), "قيد الانجاز");
}

#[test]
fn unknown_status_survives_normalization() {
    assert_eq!(BookStatus::normalize(" معلق "), "معلق");
}
