// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cookie-session authentication.
//!
//! Credentials are verified against bcrypt hashes in the users table;
//! a successful login mints a random session token stored server-side
//! with a 30-day expiry. The HTTP layer carries the token in an httponly
//! cookie, so logout can revoke the session where a signed stateless
//! token could not.

use time::{Duration, OffsetDateTime};
use tracing::info;

use booktrack_persistence::{Persistence, SessionData, UserData};

/// Session lifetime, mirrored by the cookie's max age.
pub const SESSION_TTL: Duration = Duration::days(30);

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Registration failed because the username is taken.
    UsernameTaken {
        /// The requested username.
        username: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::UsernameTaken { username } => {
                write!(f, "Username already taken: {username}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Authentication service for credential checks and session management.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates a user and creates a session.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `user_data`).
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or the session
    /// cannot be created.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
    ) -> Result<(String, UserData), AuthError> {
        let user: UserData = persistence
            .get_user_by_username(username)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unknown username or wrong password"),
            })?;

        let password_matches: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification error: {e}"),
            })?;
        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unknown username or wrong password"),
            });
        }

        let session_token: String = Self::create_session(persistence, &user)?;
        info!(username = %user.username, "User logged in");
        Ok((session_token, user))
    }

    /// Registers a new user and logs them in.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `user_data`).
    ///
    /// # Errors
    ///
    /// Returns `UsernameTaken` for duplicate usernames, or an
    /// authentication error if the follow-up session cannot be created.
    pub fn register(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        permission: &str,
    ) -> Result<(String, UserData), AuthError> {
        let user_id: i64 = persistence
            .create_user(username, password, permission)
            .map_err(|e| match e {
                booktrack_persistence::PersistenceError::DuplicateUsername(username) => {
                    AuthError::UsernameTaken { username }
                }
                other => AuthError::AuthenticationFailed {
                    reason: format!("Failed to create user: {other}"),
                },
            })?;

        let user: UserData = persistence
            .get_user_by_id(user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User vanished after registration"),
            })?;

        let session_token: String = Self::create_session(persistence, &user)?;
        info!(username = %user.username, "User registered");
        Ok((session_token, user))
    }

    /// Validates a session token and returns the user.
    ///
    /// Checks expiry, confirms the user still exists, and refreshes the
    /// session's activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<UserData, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;
        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to refresh session: {e}"),
            })?;

        Ok(user)
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;
        Ok(())
    }

    /// Creates a session row for a user and returns its token.
    fn create_session(
        persistence: &mut Persistence,
        user: &UserData,
    ) -> Result<String, AuthError> {
        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime = OffsetDateTime::now_utc() + SESSION_TTL;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;
        persistence
            .update_last_login(user.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        Ok(session_token)
    }

    /// Generates a session token from two independent random words.
    fn generate_session_token() -> String {
        let a: u64 = rand::random();
        let b: u64 = rand::random();
        format!("{a:016x}{b:016x}")
    }
}
