// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Book classification types.
//!
//! Books carry two free-text classification columns in the store. The
//! database keeps the original Arabic strings; these enums are the closed
//! vocabulary the rest of the system compares against, with an explicit
//! `Unrecognized` fallback so an unexpected stored value never panics a
//! read path.

use serde::{Deserialize, Serialize};

/// Classification of a correspondence record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookType {
    /// External correspondence ("خارجي").
    External,
    /// Internal correspondence ("داخلي").
    Internal,
    /// Fax correspondence ("فاكس").
    Fax,
    /// Secret correspondence ("سري"). Secret books never carry
    /// incoming number/date information.
    Secret,
    /// A stored value outside the known vocabulary.
    Unrecognized(String),
}

impl BookType {
    /// Returns the stored string representation of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::External => "خارجي",
            Self::Internal => "داخلي",
            Self::Fax => "فاكس",
            Self::Secret => "سري",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Parses a stored or submitted value. Surrounding whitespace is
    /// ignored; unknown values are preserved as `Unrecognized`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "خارجي" => Self::External,
            "داخلي" => Self::Internal,
            "فاكس" => Self::Fax,
            "سري" => Self::Secret,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// True for secret books, whose incoming number/date are forced to
    /// null at insert time.
    #[must_use]
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Secret)
    }
}

/// Processing status of a correspondence record.
///
/// There is no enforced transition graph: any status may be set by any
/// update call. The pending value is what the late-books listing keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    /// The record has been handled ("انجزت").
    Accomplished,
    /// The record is still being worked ("قيد الانجاز").
    Pending,
    /// The record is under deliberation ("مداولة").
    Deliberation,
    /// A stored value outside the known vocabulary.
    Unrecognized(String),
}

impl BookStatus {
    /// Returns the stored string representation of this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Accomplished => "انجزت",
            Self::Pending => "قيد الانجاز",
            Self::Deliberation => "مداولة",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Parses a stored or submitted value, trimming whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "انجزت" => Self::Accomplished,
            "قيد الانجاز" => Self::Pending,
            "مداولة" => Self::Deliberation,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Normalizes a submitted status string to its stored form.
    ///
    /// Status filters compare trimmed values; this is the single place
    /// that normalization happens.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        Self::parse(raw).as_str().to_string()
    }
}
