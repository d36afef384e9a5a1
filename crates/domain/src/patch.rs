// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Partial-update payloads.
//!
//! Every field is optional; an absent field leaves the stored column
//! untouched. Department reassignment travels as a committee id plus a
//! comma-separated department-id list, which must be supplied together.

use serde::Deserialize;

use crate::error::DomainError;
use crate::validation::validate_date;

/// A sparse set of book fields to change.
///
/// This is the body of the JSON update endpoint and the parsed form of
/// the multipart update endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    /// New book type, if changing.
    #[serde(rename = "bookType")]
    pub book_type: Option<String>,
    /// New book number, if changing.
    #[serde(rename = "bookNo")]
    pub book_no: Option<String>,
    /// New book date (`YYYY-MM-DD`), if changing.
    #[serde(rename = "bookDate")]
    pub book_date: Option<String>,
    /// New directory tag, if changing.
    #[serde(rename = "directoryName")]
    pub directory_name: Option<String>,
    /// New incoming number, if changing.
    #[serde(rename = "incomingNo")]
    pub incoming_no: Option<String>,
    /// New incoming date (`YYYY-MM-DD`), if changing.
    #[serde(rename = "incomingDate")]
    pub incoming_date: Option<String>,
    /// New subject, if changing.
    pub subject: Option<String>,
    /// New destination, if changing.
    pub destination: Option<String>,
    /// New action note, if changing.
    #[serde(rename = "bookAction")]
    pub book_action: Option<String>,
    /// New status, if changing.
    #[serde(rename = "bookStatus")]
    pub book_status: Option<String>,
    /// New free-text notes, if changing.
    pub notes: Option<String>,
    /// New owning user, if changing.
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
    /// Committee id for department reassignment.
    #[serde(rename = "coID")]
    pub co_id: Option<i64>,
    /// Comma-separated department ids for reassignment.
    #[serde(rename = "deIDs")]
    pub de_ids: Option<String>,
}

impl BookPatch {
    /// True when no book column would change.
    ///
    /// The committee/department pairing is considered separately since it
    /// rewrites bridge rows rather than book columns.
    #[must_use]
    pub const fn is_column_empty(&self) -> bool {
        self.book_type.is_none()
            && self.book_no.is_none()
            && self.book_date.is_none()
            && self.directory_name.is_none()
            && self.incoming_no.is_none()
            && self.incoming_date.is_none()
            && self.subject.is_none()
            && self.destination.is_none()
            && self.book_action.is_none()
            && self.book_status.is_none()
            && self.notes.is_none()
            && self.user_id.is_none()
    }

    /// True when a department reassignment was requested.
    #[must_use]
    pub const fn has_pairing(&self) -> bool {
        self.co_id.is_some() || self.de_ids.is_some()
    }

    /// Validates the patch without applying it.
    ///
    /// Checks date formats and the both-or-neither rule for the
    /// committee/department pairing.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(date) = &self.book_date {
            validate_date(date)?;
        }
        if let Some(date) = &self.incoming_date {
            validate_date(date)?;
        }
        if self.co_id.is_some() != self.de_ids.is_some() {
            return Err(DomainError::IncompletePairing);
        }
        Ok(())
    }
}
