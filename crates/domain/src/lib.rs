// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rule validation for the BookTrack follow-up system.
//!
//! This crate defines the vocabulary of the system: book type and status
//! classifications, patch semantics for partial updates, boundary
//! validation (department-id lists, date formats, the secret-book rule),
//! and the subject-similarity matching used by the search endpoint.
//!
//! The crate is deliberately free of persistence and HTTP concerns so
//! rules can be tested in isolation.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod patch;
mod subject_match;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use patch::BookPatch;
pub use subject_match::{significant_words, similarity_ratio};
pub use types::{BookStatus, BookType};
pub use validation::{parse_department_ids, validate_date, year_of_date};
