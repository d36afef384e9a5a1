// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors produced by domain validation.
///
/// Domain validation runs before any write; these errors always map to
/// client errors at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date string did not match `YYYY-MM-DD`.
    InvalidDate {
        /// The offending value.
        value: String,
    },
    /// A department-id list contained a non-integer entry.
    InvalidDepartmentIds {
        /// The offending raw list.
        value: String,
    },
    /// A department-id list was empty after parsing.
    EmptyDepartmentIds,
    /// A committee id was supplied without department ids, or vice versa.
    IncompletePairing,
    /// An update carried no fields, no pairing, and no file.
    EmptyUpdate,
    /// A file was supplied without a user id to attribute it to.
    MissingUserForFile,
    /// A page number below 1 was requested.
    InvalidPage {
        /// The requested page.
        page: i64,
    },
    /// A page size outside 1..=100 was requested.
    InvalidLimit {
        /// The requested limit.
        limit: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { value } => {
                write!(f, "Invalid date '{value}'; expected YYYY-MM-DD")
            }
            Self::InvalidDepartmentIds { value } => {
                write!(f, "Invalid department id list '{value}'")
            }
            Self::EmptyDepartmentIds => write!(f, "Department id list is empty"),
            Self::IncompletePairing => {
                write!(
                    f,
                    "Committee id and department ids must be supplied together"
                )
            }
            Self::EmptyUpdate => write!(f, "Update carries no changes"),
            Self::MissingUserForFile => {
                write!(f, "A user id is required when uploading a file")
            }
            Self::InvalidPage { page } => write!(f, "Invalid page {page}; must be >= 1"),
            Self::InvalidLimit { limit } => {
                write!(f, "Invalid limit {limit}; must be between 1 and 100")
            }
        }
    }
}

impl std::error::Error for DomainError {}
