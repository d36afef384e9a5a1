// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_cookies::{Cookie, CookieManagerLayer, Cookies, cookie::SameSite};
use tracing::{error, info};

use booktrack_api::{
    ApiError, AuthResponse, AuthenticationService, BookFollowUpService, BookResponse,
    BookStatusCounts, BookTypeCounts, CommitteeResponse, CommitteeWithDepartments,
    CreateBookInput, CreateBookResponse, CurrentUserResponse, DeletePdfRequest,
    DepartmentResponse, ExistsResponse, LoginRequest, MessageResponse, PaginatedBooks,
    PdfFileResponse, PdfService, RegisterRequest, ReportFiltersEcho, ReportService,
    ReportWithStats, SESSION_TTL, SubjectSearchRequest, UpdateBookResponse,
    UserBookCountResponse,
};
use booktrack_domain::BookPatch;
use booktrack_persistence::{BookFilters, Persistence, PersistenceError};

mod config;
mod session;

use config::{DatabaseConfig, Mode, ServerConfig};
use session::{SESSION_COOKIE, SessionUser};

/// BookTrack Server - HTTP server for the book follow-up system.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind host, overriding the HOST environment variable.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding the PORT environment variable.
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a `SQLite` database file, overriding the configured
    /// database selection.
    #[arg(short, long)]
    database: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence adapter wrapped in a Mutex for safe concurrent
    /// access.
    pub persistence: Arc<Mutex<Persistence>>,
    /// The immutable server configuration.
    pub config: Arc<ServerConfig>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    /// A 400 with the given message.
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

// ============================================================================
// Query parameter structures
// ============================================================================

/// Query parameters for the paginated listing.
#[derive(Debug, Deserialize)]
struct GetAllQuery {
    page: Option<i64>,
    limit: Option<i64>,
    #[serde(rename = "bookNo")]
    book_no: Option<String>,
    #[serde(rename = "bookStatus")]
    book_status: Option<String>,
    #[serde(rename = "bookType")]
    book_type: Option<String>,
    #[serde(rename = "directoryName")]
    directory_name: Option<String>,
    subject: Option<String>,
    #[serde(rename = "incomingNo")]
    incoming_no: Option<String>,
}

/// Query parameters for the late-books listing. `userID` is required.
#[derive(Debug, Deserialize)]
struct LateBooksQuery {
    page: Option<i64>,
    limit: Option<i64>,
    #[serde(rename = "userID")]
    user_id: i64,
}

/// Query parameters shared by the reporting endpoints.
#[derive(Debug, Deserialize)]
struct ReportQuery {
    #[serde(rename = "bookType")]
    book_type: Option<String>,
    #[serde(rename = "bookStatus")]
    book_status: Option<String>,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
    #[serde(rename = "unfinishedOnly")]
    unfinished_only: Option<bool>,
    #[serde(rename = "coID")]
    co_id: Option<i64>,
    #[serde(rename = "deID")]
    de_id: Option<i64>,
}

impl From<ReportQuery> for ReportFiltersEcho {
    fn from(query: ReportQuery) -> Self {
        Self {
            book_type: query.book_type,
            book_status: query.book_status,
            start_date: query.start_date,
            end_date: query.end_date,
            unfinished_only: query.unfinished_only.unwrap_or(false),
            co_id: query.co_id,
            de_id: query.de_id,
        }
    }
}

/// Query parameters for the book-number existence probe.
#[derive(Debug, Deserialize)]
struct CheckBookNoQuery {
    #[serde(rename = "bookNo")]
    book_no: String,
    #[serde(rename = "bookType")]
    book_type: String,
    #[serde(rename = "bookDate")]
    book_date: String,
}

/// Query parameters for the directory-name search.
#[derive(Debug, Deserialize)]
struct DirectorySearchQuery {
    search: Option<String>,
}

// ============================================================================
// Multipart handling
// ============================================================================

/// A parsed multipart form: text fields plus at most one file.
struct MultipartForm {
    fields: HashMap<String, String>,
    file: Option<(Vec<u8>, String)>,
}

impl MultipartForm {
    /// Returns a trimmed optional field, treating empty as absent.
    fn get(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Returns a required field.
    fn require(&self, name: &str) -> Result<String, HttpError> {
        self.get(name)
            .ok_or_else(|| HttpError::bad_request(format!("Missing form field '{name}'")))
    }

    /// Returns a required integer field.
    fn require_i64(&self, name: &str) -> Result<i64, HttpError> {
        self.require(name)?
            .parse()
            .map_err(|_| HttpError::bad_request(format!("Form field '{name}' must be an integer")))
    }

    /// Returns an optional integer field.
    fn get_i64(&self, name: &str) -> Result<Option<i64>, HttpError> {
        self.get(name)
            .map(|v| {
                v.parse().map_err(|_| {
                    HttpError::bad_request(format!("Form field '{name}' must be an integer"))
                })
            })
            .transpose()
    }
}

/// Drains a multipart stream into text fields and the uploaded file.
async fn read_multipart(mut multipart: Multipart) -> Result<MultipartForm, HttpError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name: String = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename: String = field.file_name().unwrap_or("upload.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| HttpError::bad_request(format!("Failed to read file: {e}")))?;
            file = Some((bytes.to_vec(), filename));
        } else {
            let value: String = field
                .text()
                .await
                .map_err(|e| HttpError::bad_request(format!("Failed to read field: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(MultipartForm { fields, file })
}

// ============================================================================
// Book handlers
// ============================================================================

/// Handler for POST `/api/bookFollowUp` — create a book with its first
/// PDF.
async fn handle_create_book(
    AxumState(state): AxumState<AppState>,
    multipart: Multipart,
) -> Result<Json<CreateBookResponse>, HttpError> {
    let form: MultipartForm = read_multipart(multipart).await?;
    let (file_bytes, original_filename) = form
        .file
        .clone()
        .ok_or_else(|| HttpError::bad_request("Missing uploaded file"))?;

    let input: CreateBookInput = CreateBookInput {
        book_no: form.require("bookNo")?,
        book_date: form.require("bookDate")?,
        book_type: form.require("bookType")?,
        directory_name: form.get("directoryName"),
        incoming_no: form.get("incomingNo"),
        incoming_date: form.get("incomingDate"),
        subject: form.get("subject"),
        destination: form.get("destination"),
        book_action: form.get("bookAction"),
        book_status: form.get("bookStatus"),
        notes: form.get("notes"),
        user_id: form.require_i64("userID")?,
        co_id: form.require_i64("coID")?,
        de_ids: form.require("deIDs")?,
        file_bytes,
        original_filename,
    };

    info!(book_no = %input.book_no, "Handling create book request");

    let mut persistence = state.persistence.lock().await;
    let response: CreateBookResponse = BookFollowUpService::create_book(
        &mut persistence,
        &state.config.upload_dir,
        &state.config.source_dir,
        &input,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/api/bookFollowUp/{id}` — multipart partial update
/// with optional PDF append.
async fn handle_update_book(
    AxumState(state): AxumState<AppState>,
    Path(book_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<UpdateBookResponse>, HttpError> {
    let form: MultipartForm = read_multipart(multipart).await?;

    let patch: BookPatch = BookPatch {
        book_type: form.get("bookType"),
        book_no: form.get("bookNo"),
        book_date: form.get("bookDate"),
        directory_name: form.get("directoryName"),
        incoming_no: form.get("incomingNo"),
        incoming_date: form.get("incomingDate"),
        subject: form.get("subject"),
        destination: form.get("destination"),
        book_action: form.get("bookAction"),
        book_status: form.get("bookStatus"),
        notes: form.get("notes"),
        user_id: form.get_i64("userID")?,
        co_id: form.get_i64("coID")?,
        de_ids: form.get("deIDs"),
    };

    info!(book_id, "Handling multipart update request");

    let mut persistence = state.persistence.lock().await;
    let response: UpdateBookResponse = BookFollowUpService::update_book(
        &mut persistence,
        &state.config.upload_dir,
        &state.config.source_dir,
        book_id,
        &patch,
        form.file.as_ref(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/api/bookFollowUp/{id}/json` — JSON partial
/// update, no file.
async fn handle_update_book_json(
    AxumState(state): AxumState<AppState>,
    Path(book_id): Path<i64>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<UpdateBookResponse>, HttpError> {
    info!(book_id, "Handling JSON update request");

    let mut persistence = state.persistence.lock().await;
    let response: UpdateBookResponse = BookFollowUpService::update_book(
        &mut persistence,
        &state.config.upload_dir,
        &state.config.source_dir,
        book_id,
        &patch,
        None,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/bookFollowUp/getAll` — paginated filtered
/// listing.
async fn handle_get_all(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<GetAllQuery>,
) -> Result<Json<PaginatedBooks>, HttpError> {
    let filters: BookFilters = BookFilters {
        book_no: query.book_no,
        book_status: query.book_status,
        book_type: query.book_type,
        directory_name: query.directory_name,
        subject: query.subject,
        incoming_no: query.incoming_no,
    };

    let mut persistence = state.persistence.lock().await;
    let page: PaginatedBooks = BookFollowUpService::list_books(
        &mut persistence,
        filters,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/api/bookFollowUp/lateBooks` — pending books for a
/// user.
async fn handle_late_books(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<LateBooksQuery>,
) -> Result<Json<PaginatedBooks>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let page: PaginatedBooks = BookFollowUpService::late_books(
        &mut persistence,
        query.user_id,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/api/bookFollowUp/getBookFollowUpByBookID/{id}`.
async fn handle_get_book_by_id(
    AxumState(state): AxumState<AppState>,
    Path(book_id): Path<i64>,
) -> Result<Json<BookResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let book: BookResponse = BookFollowUpService::get_book_with_pdfs(&mut persistence, book_id)?;
    drop(persistence);

    Ok(Json(book))
}

/// Handler for GET `/api/bookFollowUp/getAllBooksNo`.
async fn handle_all_book_numbers(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<String>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let numbers: Vec<String> = BookFollowUpService::all_book_numbers(&mut persistence)?;
    drop(persistence);
    Ok(Json(numbers))
}

/// Handler for GET `/api/bookFollowUp/getAllIncomingNo`.
async fn handle_all_incoming_numbers(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<String>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let numbers: Vec<String> = BookFollowUpService::all_incoming_numbers(&mut persistence)?;
    drop(persistence);
    Ok(Json(numbers))
}

/// Handler for GET `/api/bookFollowUp/getAllDirectoryNames`.
async fn handle_directory_names(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<DirectorySearchQuery>,
) -> Result<Json<Vec<String>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let names: Vec<String> = BookFollowUpService::directory_names(
        &mut persistence,
        query.search.as_deref().unwrap_or(""),
    )?;
    drop(persistence);
    Ok(Json(names))
}

/// Handler for GET `/api/bookFollowUp/checkBookNoExists`.
async fn handle_check_book_no(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<CheckBookNoQuery>,
) -> Result<Json<ExistsResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: ExistsResponse = BookFollowUpService::check_book_no_exists(
        &mut persistence,
        &query.book_no,
        &query.book_type,
        &query.book_date,
    )?;
    drop(persistence);
    Ok(Json(response))
}

// ============================================================================
// PDF handlers
// ============================================================================

/// Handler for POST `/api/bookFollowUp/add-supplement` — append a PDF to
/// an existing book.
async fn handle_add_supplement(
    AxumState(state): AxumState<AppState>,
    multipart: Multipart,
) -> Result<Json<PdfFileResponse>, HttpError> {
    let form: MultipartForm = read_multipart(multipart).await?;
    let (file_bytes, original_filename) = form
        .file
        .clone()
        .ok_or_else(|| HttpError::bad_request("Missing uploaded file"))?;
    let book_id: i64 = form.require_i64("bookID")?;
    let user_id: i64 = form.require_i64("userID")?;

    info!(book_id, "Handling add-supplement request");

    let mut persistence = state.persistence.lock().await;
    let response: PdfFileResponse = PdfService::add_supplement(
        &mut persistence,
        &state.config.upload_dir,
        &state.config.source_dir,
        book_id,
        user_id,
        &file_bytes,
        &original_filename,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/bookFollowUp/pdf/{bookNo}` — PDF metadata for a
/// book number.
async fn handle_pdfs_for_book(
    AxumState(state): AxumState<AppState>,
    Path(book_no): Path<String>,
) -> Result<Json<Vec<PdfFileResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let pdfs: Vec<PdfFileResponse> = PdfService::list_for_book_no(&mut persistence, &book_no)?;
    drop(persistence);
    Ok(Json(pdfs))
}

/// Handler for GET `/api/bookFollowUp/pdf/file/{pdfId}` — stream the
/// stored PDF bytes.
async fn handle_pdf_file(
    AxumState(state): AxumState<AppState>,
    Path(pdf_id): Path<i64>,
) -> Result<Response, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let path: String = PdfService::file_path(&mut persistence, pdf_id)?;
    drop(persistence);

    let bytes: Vec<u8> = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HttpError {
                status: StatusCode::NOT_FOUND,
                message: format!("PDF file missing from storage: {path}"),
            }
        } else {
            HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Failed to read PDF: {e}"),
            }
        }
    })?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response())
}

/// Handler for DELETE `/api/bookFollowUp/delete_pdf` — remove a PDF row
/// and best-effort its backing file.
async fn handle_delete_pdf(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<DeletePdfRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    PdfService::delete_pdf(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(MessageResponse {
        message: String::from("PDF deleted successfully"),
    }))
}

// ============================================================================
// Report handlers
// ============================================================================

/// Handler for GET `/api/bookFollowUp/report` — simple filtered report.
async fn handle_report(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<BookResponse>>, HttpError> {
    let echo: ReportFiltersEcho = query.into();
    let mut persistence = state.persistence.lock().await;
    let rows: Vec<BookResponse> = ReportService::report(&mut persistence, &echo)?;
    drop(persistence);
    Ok(Json(rows))
}

/// Handler for GET `/api/bookFollowUp/report-with-stats`.
async fn handle_report_with_stats(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportWithStats>, HttpError> {
    let echo: ReportFiltersEcho = query.into();
    let mut persistence = state.persistence.lock().await;
    let report: ReportWithStats = ReportService::report_with_stats(&mut persistence, &echo)?;
    drop(persistence);
    Ok(Json(report))
}

/// Handler for GET `/api/bookFollowUp/report-with-stats-department` —
/// the committee/department-scoped statistics variant.
async fn handle_report_with_stats_department(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportWithStats>, HttpError> {
    let echo: ReportFiltersEcho = query.into();
    let mut persistence = state.persistence.lock().await;
    let report: ReportWithStats = ReportService::report_with_stats(&mut persistence, &echo)?;
    drop(persistence);
    Ok(Json(report))
}

/// Handler for GET `/api/bookFollowUp/committees-with-departments`.
async fn handle_committees_with_departments(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<CommitteeWithDepartments>>, HttpError> {
    let echo: ReportFiltersEcho = query.into();
    let mut persistence = state.persistence.lock().await;
    let grouped: Vec<CommitteeWithDepartments> =
        ReportService::committees_with_departments(&mut persistence, &echo)?;
    drop(persistence);
    Ok(Json(grouped))
}

/// Handler for POST `/api/bookFollowUp/searchBookSubjects`.
async fn handle_search_subjects(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SubjectSearchRequest>,
) -> Result<Json<Vec<BookResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let rows: Vec<BookResponse> =
        ReportService::search_by_subject(&mut persistence, &request.subject)?;
    drop(persistence);
    Ok(Json(rows))
}

// ============================================================================
// Directory handlers
// ============================================================================

/// Handler for GET `/api/bookFollowUp/committees`.
async fn handle_committees(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<CommitteeResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let committees: Vec<CommitteeResponse> = persistence
        .list_committees()?
        .into_iter()
        .map(|c| CommitteeResponse {
            co_id: c.co_id,
            committee_name: c.committee_name,
        })
        .collect();
    drop(persistence);
    Ok(Json(committees))
}

/// Handler for the committee-departments lookups — both
/// GET `/{coID}/departments` and GET `/committees/{coID}/departments`
/// resolve here.
async fn handle_committee_departments(
    AxumState(state): AxumState<AppState>,
    Path(co_id): Path<i64>,
) -> Result<Json<Vec<DepartmentResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let departments: Vec<DepartmentResponse> = persistence
        .departments_for_committee(co_id)?
        .into_iter()
        .map(|d| DepartmentResponse {
            de_id: d.de_id,
            department_name: d.department_name,
        })
        .collect();
    drop(persistence);

    if departments.is_empty() {
        return Err(ApiError::from(PersistenceError::CommitteeNotFound(co_id)).into());
    }
    Ok(Json(departments))
}

// ============================================================================
// Count handlers
// ============================================================================

/// Handler for GET `/api/bookFollowUp/counts/book-type`.
async fn handle_book_type_counts(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<BookTypeCounts>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let counts: BookTypeCounts = BookFollowUpService::book_type_counts(&mut persistence)?;
    drop(persistence);
    Ok(Json(counts))
}

/// Handler for GET `/api/bookFollowUp/counts/book-status`.
async fn handle_book_status_counts(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<BookStatusCounts>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let counts: BookStatusCounts = BookFollowUpService::book_status_counts(&mut persistence)?;
    drop(persistence);
    Ok(Json(counts))
}

/// Handler for GET `/api/bookFollowUp/counts/user-books`.
async fn handle_user_book_counts(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<UserBookCountResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let counts: Vec<UserBookCountResponse> =
        BookFollowUpService::user_book_counts(&mut persistence)?;
    drop(persistence);
    Ok(Json(counts))
}

// ============================================================================
// Auth handlers
// ============================================================================

/// Builds the session cookie for a freshly minted token.
fn session_cookie(token: String, mode: Mode) -> Cookie<'static> {
    let mut cookie: Cookie<'static> = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Strict);
    cookie.set_secure(mode == Mode::Production);
    cookie.set_max_age(SESSION_TTL);
    cookie
}

/// Handler for POST `/auth/login` — verify credentials and set the
/// session cookie.
async fn handle_login(
    AxumState(state): AxumState<AppState>,
    cookies: Cookies,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, HttpError> {
    info!(username = %request.username, "Handling login request");

    let mut persistence = state.persistence.lock().await;
    let (token, _user) =
        AuthenticationService::login(&mut persistence, &request.username, &request.password)
            .map_err(ApiError::from)?;
    drop(persistence);

    cookies.add(session_cookie(token, state.config.mode));
    Ok(Json(AuthResponse {
        message: String::from("Authenticated"),
    }))
}

/// Handler for POST `/auth/register` — create a user and log them in.
async fn handle_register(
    AxumState(state): AxumState<AppState>,
    cookies: Cookies,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, HttpError> {
    info!(username = %request.username, "Handling register request");

    let permission: String = request.permission.unwrap_or_else(|| String::from("user"));
    let mut persistence = state.persistence.lock().await;
    let (token, user) = AuthenticationService::register(
        &mut persistence,
        &request.username,
        &request.password,
        &permission,
    )
    .map_err(ApiError::from)?;
    drop(persistence);

    cookies.add(session_cookie(token, state.config.mode));
    Ok(Json(AuthResponse {
        message: format!("Registered {}", user.username),
    }))
}

/// Handler for POST `/auth/logout` — revoke the session and clear the
/// cookie.
async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    cookies: Cookies,
) -> Result<Json<AuthResponse>, HttpError> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        let token: String = cookie.value().to_string();
        let mut persistence = state.persistence.lock().await;
        AuthenticationService::logout(&mut persistence, &token).map_err(ApiError::from)?;
        drop(persistence);
    }

    let mut removal: Cookie<'static> = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);

    Ok(Json(AuthResponse {
        message: String::from("Logged out"),
    }))
}

/// Handler for GET `/auth/me` — the cookie-validated current user.
async fn handle_me(SessionUser(user): SessionUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        id: user.user_id,
        username: user.username,
        permission: user.permission,
    })
}

// ============================================================================
// Router & main
// ============================================================================

/// Builds the application router with all endpoints.
fn build_router(state: AppState) -> Router {
    let book_routes: Router<AppState> = Router::new()
        .route("/", post(handle_create_book))
        .route("/add-supplement", post(handle_add_supplement))
        .route("/getAll", get(handle_get_all))
        .route("/lateBooks", get(handle_late_books))
        .route("/getAllBooksNo", get(handle_all_book_numbers))
        .route("/getAllIncomingNo", get(handle_all_incoming_numbers))
        .route("/getAllDirectoryNames", get(handle_directory_names))
        .route("/checkBookNoExists", get(handle_check_book_no))
        .route("/getBookFollowUpByBookID/{id}", get(handle_get_book_by_id))
        .route("/pdf/file/{id}", get(handle_pdf_file))
        .route("/pdf/{bookNo}", get(handle_pdfs_for_book))
        .route("/{id}", patch(handle_update_book))
        .route("/{id}/json", patch(handle_update_book_json))
        .route("/report", get(handle_report))
        .route("/report-with-stats", get(handle_report_with_stats))
        .route(
            "/report-with-stats-department",
            get(handle_report_with_stats_department),
        )
        .route(
            "/committees-with-departments",
            get(handle_committees_with_departments),
        )
        .route("/searchBookSubjects", post(handle_search_subjects))
        .route("/delete_pdf", delete(handle_delete_pdf))
        .route("/committees", get(handle_committees))
        .route(
            "/committees/{id}/departments",
            get(handle_committee_departments),
        )
        // Short alias; the parameter name must match the sibling "/{id}"
        // routes or the router rejects the overlap.
        .route("/{id}/departments", get(handle_committee_departments))
        .route("/counts/book-type", get(handle_book_type_counts))
        .route("/counts/book-status", get(handle_book_status_counts))
        .route("/counts/user-books", get(handle_user_book_counts));

    let auth_routes: Router<AppState> = Router::new()
        .route("/login", post(handle_login))
        .route("/register", post(handle_register))
        .route("/logout", post(handle_logout))
        .route("/me", get(handle_me));

    Router::new()
        .nest("/api/bookFollowUp", book_routes)
        .nest("/auth", auth_routes)
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env first, so the config loader sees it.
    dotenvy::dotenv().ok();

    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing BookTrack server");

    let mut config: ServerConfig = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = args.database {
        config.database = DatabaseConfig::Sqlite { path };
    }

    let migrate: bool = config.mode.runs_migrations();
    if migrate {
        info!("Development mode: running schema migrations at startup");
    } else {
        info!("Production mode: skipping schema migrations");
    }

    let persistence: Persistence = match &config.database {
        DatabaseConfig::Sqlite { path } => {
            info!("Using SQLite database at: {}", path);
            Persistence::new_with_file(path, migrate)?
        }
        DatabaseConfig::Mysql { url } => {
            info!("Using MySQL database");
            Persistence::new_with_mysql(url, migrate)?
        }
    };

    let state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: Arc::new(config.clone()),
    };

    let app: Router = build_router(state);

    let addr: std::net::SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
