// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary layer for the BookTrack follow-up system.
//!
//! This crate holds the business services between the HTTP surface and
//! the persistence adapter: book creation and update (multi-department
//! junction management, PDF append), the filtered/paginated listing, late
//! book detection, reporting and statistics, subject search, PDF metadata
//! management, and cookie-session authentication.
//!
//! Domain validation runs here, before any write; persistence failures
//! surface as internal errors; everything crossing this boundary is a
//! plain request/response struct.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod books;
mod error;
mod pdfs;
mod reports;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthenticationService, SESSION_TTL};
pub use books::BookFollowUpService;
pub use error::{ApiError, translate_domain_error};
pub use pdfs::PdfService;
pub use reports::ReportService;
pub use request_response::{
    AuthResponse, BookResponse, BookStatusCounts, BookTypeCounts, CommitteeResponse,
    CommitteeStat, CommitteeWithDepartments, CreateBookInput, CreateBookResponse,
    CurrentUserResponse, DeletePdfRequest, DepartmentInfo, DepartmentResponse, DepartmentStat,
    ExistsResponse, LoginRequest, MessageResponse, PaginatedBooks, PdfFileResponse,
    RegisterRequest, ReportFiltersEcho, ReportWithStats, SubjectSearchRequest,
    UpdateBookResponse, UserBookCountResponse,
};
