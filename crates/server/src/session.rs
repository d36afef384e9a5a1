// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for cookie-authenticated endpoints.
//!
//! The session token travels in an httponly cookie; this module provides
//! the Axum extractor that validates it against the session store.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_cookies::Cookies;
use tracing::{debug, warn};

use booktrack_api::AuthenticationService;
use booktrack_persistence::UserData;

use crate::AppState;

/// The cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Extractor for the authenticated user behind the session cookie.
///
/// # Authentication Flow
///
/// 1. Read the `session_token` cookie
/// 2. Validate the token via `AuthenticationService::validate_session`
/// 3. Check session expiration and that the user still exists
/// 4. Return the `UserData`
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the cookie is missing or the
/// session is invalid or expired.
pub struct SessionUser(pub UserData);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies: Cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                warn!("Cookie jar unavailable on request");
                SessionError::MissingSessionCookie
            })?;

        let token: String = cookies
            .get(SESSION_COOKIE)
            .ok_or_else(|| {
                debug!("Missing session cookie");
                SessionError::MissingSessionCookie
            })?
            .value()
            .to_string();

        let mut persistence = state.persistence.lock().await;
        let user: UserData = AuthenticationService::validate_session(&mut persistence, &token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;
        drop(persistence);

        debug!(username = %user.username, "Session validated");
        Ok(Self(user))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// No session cookie was sent.
    MissingSessionCookie,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSessionCookie => {
                (StatusCode::UNAUTHORIZED, "Missing session cookie").into_response()
            }
            Self::InvalidSession(reason) => (
                StatusCode::UNAUTHORIZED,
                format!("Session validation failed: {reason}"),
            )
                .into_response(),
        }
    }
}
