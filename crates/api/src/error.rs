// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use booktrack_domain::DomainError;
use booktrack_files::FileStorageError;
use booktrack_persistence::PersistenceError;

use crate::auth::AuthError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract: the HTTP layer maps each variant to a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with existing state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::UsernameTaken { username } => Self::Conflict {
                message: format!("Username '{username}' is already taken"),
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::BookNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Book"),
                message: format!("Book {id} does not exist"),
            },
            PersistenceError::PdfNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("PDF"),
                message: format!("PDF {id} does not exist"),
            },
            PersistenceError::CommitteeNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Committee"),
                message: format!("Committee {id} has no departments"),
            },
            PersistenceError::DuplicateUsername(name) => Self::Conflict {
                message: format!("Username '{name}' is already taken"),
            },
            other => Self::Internal {
                message: format!("Database error: {other}"),
            },
        }
    }
}

impl From<FileStorageError> for ApiError {
    fn from(err: FileStorageError) -> Self {
        match err {
            FileStorageError::AlreadyExists { path } => Self::Conflict {
                message: format!("PDF already exists at {path}"),
            },
            FileStorageError::InvalidBookDate { value } => Self::InvalidInput {
                field: String::from("bookDate"),
                message: format!("Invalid book date '{value}'"),
            },
            FileStorageError::Io(e) => Self::Internal {
                message: format!("File storage error: {e}"),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDate { value } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Invalid date '{value}'; expected YYYY-MM-DD"),
        },
        DomainError::InvalidDepartmentIds { value } => ApiError::InvalidInput {
            field: String::from("deIDs"),
            message: format!("Invalid department id list '{value}'"),
        },
        DomainError::EmptyDepartmentIds => ApiError::InvalidInput {
            field: String::from("deIDs"),
            message: String::from("Department id list is empty"),
        },
        DomainError::IncompletePairing => ApiError::InvalidInput {
            field: String::from("coID/deIDs"),
            message: String::from("Committee id and department ids must be supplied together"),
        },
        DomainError::EmptyUpdate => ApiError::InvalidInput {
            field: String::from("body"),
            message: String::from("Update carries no changes"),
        },
        DomainError::MissingUserForFile => ApiError::InvalidInput {
            field: String::from("userID"),
            message: String::from("A user id is required when uploading a file"),
        },
        DomainError::InvalidPage { page } => ApiError::InvalidInput {
            field: String::from("page"),
            message: format!("Invalid page {page}; must be >= 1"),
        },
        DomainError::InvalidLimit { limit } => ApiError::InvalidInput {
            field: String::from("limit"),
            message: format!("Invalid limit {limit}; must be between 1 and 100"),
        },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}
