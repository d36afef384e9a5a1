// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end router tests against in-memory stores.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tokio::sync::Mutex;
use tower::ServiceExt;

use booktrack_persistence::Persistence;

use super::{AppState, build_router};
use crate::config::{DatabaseConfig, Mode, ServerConfig};

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Creates a unique scratch directory for one test.
fn scratch_dir() -> PathBuf {
    let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir: PathBuf = std::env::temp_dir().join(format!(
        "booktrack-server-test-{}-{id}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

/// Builds an app state over a fresh in-memory store.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("failed to create in-memory persistence");
    let config: ServerConfig = ServerConfig {
        host: String::from("127.0.0.1"),
        port: 0,
        database: DatabaseConfig::Sqlite {
            path: String::from(":memory:"),
        },
        upload_dir: scratch_dir(),
        source_dir: scratch_dir(),
        mode: Mode::Development,
    };
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: Arc::new(config),
    }
}

/// Seeds a committee, two departments, and a user; returns
/// (co, de_a, de_b, user).
async fn seed_base(state: &AppState) -> (i64, i64, i64, i64) {
    let mut persistence = state.persistence.lock().await;
    let co: i64 = persistence.create_committee("اللجنة الادارية").unwrap();
    let de_a: i64 = persistence.create_department("قسم الادارة").unwrap();
    let de_b: i64 = persistence.create_department("قسم المالية").unwrap();
    let user: i64 = persistence
        .create_user("archivist", "secret123", "user")
        .unwrap();
    (co, de_a, de_b, user)
}

const BOUNDARY: &str = "X-BOOKTRACK-TEST-BOUNDARY";

/// Hand-rolls a multipart body from text fields plus an optional file.
fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Sends a multipart POST/PATCH and returns the response.
async fn send_multipart(
    app: Router,
    method: &str,
    uri: &str,
    body: Vec<u8>,
) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Sends a JSON request and returns the response.
async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Sends a bare GET and returns the response.
async fn send_get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Reads a response body as JSON.
async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a standard book through the HTTP surface; returns its id.
async fn create_book_via_http(
    app: &Router,
    book_no: &str,
    co: i64,
    de_ids: &str,
    user: i64,
) -> i64 {
    let body: Vec<u8> = multipart_body(
        &[
            ("bookNo", book_no),
            ("bookDate", "2024-01-15"),
            ("bookType", "خارجي"),
            ("directoryName", "مكتب المدير"),
            ("incomingNo", "77"),
            ("incomingDate", "2024-01-10"),
            ("subject", "طلب اجازة اعتيادية"),
            ("destination", "بغداد"),
            ("bookAction", "للاطلاع"),
            ("bookStatus", "قيد الانجاز"),
            ("userID", &user.to_string()),
            ("coID", &co.to_string()),
            ("deIDs", de_ids),
        ],
        Some(("scan.pdf", b"%PDF-1.4 test")),
    );
    let response = send_multipart(app.clone(), "POST", "/api/bookFollowUp", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["bookID"].as_i64().unwrap()
}

#[tokio::test]
async fn get_all_on_an_empty_store_returns_the_empty_envelope() {
    let state: AppState = create_test_app_state();
    let app: Router = build_router(state);

    let response = send_get(app, "/api/bookFollowUp/getAll?page=1&limit=10").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
    assert_eq!(json["total"], 0);
    assert_eq!(json["page"], 1);
    assert_eq!(json["limit"], 10);
    assert_eq!(json["totalPages"], 0);
}

#[tokio::test]
async fn filtered_empty_set_keeps_the_envelope_shape() {
    let state: AppState = create_test_app_state();
    seed_base(&state).await;
    let app: Router = build_router(state);

    let uri: &str =
        "/api/bookFollowUp/getAll?page=1&limit=10&bookStatus=%D9%82%D9%8A%D8%AF%20%D8%A7%D9%84%D8%A7%D9%86%D8%AC%D8%A7%D8%B2";
    let response = send_get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
    assert_eq!(json["total"], 0);
    assert_eq!(json["totalPages"], 0);
}

#[tokio::test]
async fn create_book_round_trips_through_the_listing() {
    let state: AppState = create_test_app_state();
    let (co, de_a, de_b, user) = seed_base(&state).await;
    let app: Router = build_router(state);

    let book_id: i64 =
        create_book_via_http(&app, "123", co, &format!("{de_a},{de_b}"), user).await;

    let response = send_get(app.clone(), "/api/bookFollowUp/getAll?page=1&limit=10").await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    let row = &json["data"][0];
    assert_eq!(row["bookNo"], "123");
    assert_eq!(row["username"], "archivist");
    assert_eq!(row["department_count"], 2);
    assert_eq!(row["pdfFiles"].as_array().unwrap().len(), 1);

    let response = send_get(
        app,
        &format!("/api/bookFollowUp/getBookFollowUpByBookID/{book_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["department_count"], 2);
    assert_eq!(json["department_names"], "قسم الادارة, قسم المالية");
    assert_eq!(json["countOfPDFs"], 1);
}

#[tokio::test]
async fn create_book_without_a_file_is_a_client_error() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);

    let body: Vec<u8> = multipart_body(
        &[
            ("bookNo", "9"),
            ("bookDate", "2024-01-15"),
            ("bookType", "خارجي"),
            ("userID", &user.to_string()),
            ("coID", &co.to_string()),
            ("deIDs", &de_a.to_string()),
        ],
        None,
    );
    let response = send_multipart(app, "POST", "/api/bookFollowUp", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn json_patch_updates_status() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    let book_id: i64 = create_book_via_http(&app, "55", co, &de_a.to_string(), user).await;

    let response = send_json(
        app.clone(),
        "PATCH",
        &format!("/api/bookFollowUp/{book_id}/json"),
        serde_json::json!({"bookStatus": "انجزت"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_get(
        app,
        &format!("/api/bookFollowUp/getBookFollowUpByBookID/{book_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["bookStatus"], "انجزت");
}

#[tokio::test]
async fn empty_json_patch_is_a_client_error() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    let book_id: i64 = create_book_via_http(&app, "1", co, &de_a.to_string(), user).await;

    let response = send_json(
        app,
        "PATCH",
        &format!("/api/bookFollowUp/{book_id}/json"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn half_supplied_pairing_is_a_client_error() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    let book_id: i64 = create_book_via_http(&app, "2", co, &de_a.to_string(), user).await;

    let response = send_json(
        app,
        "PATCH",
        &format!("/api/bookFollowUp/{book_id}/json"),
        serde_json::json!({"coID": co}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patching_a_missing_book_is_not_found() {
    let state: AppState = create_test_app_state();
    seed_base(&state).await;
    let app: Router = build_router(state);

    let response = send_json(
        app,
        "PATCH",
        "/api/bookFollowUp/4242/json",
        serde_json::json!({"notes": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn existence_probe_answers_by_type_number_and_year() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    create_book_via_http(&app, "123", co, &de_a.to_string(), user).await;

    let taken = send_get(
        app.clone(),
        "/api/bookFollowUp/checkBookNoExists?bookNo=123&bookType=%D8%AE%D8%A7%D8%B1%D8%AC%D9%8A&bookDate=2024-06-01",
    )
    .await;
    assert_eq!(body_json(taken).await["exists"], true);

    let free = send_get(
        app,
        "/api/bookFollowUp/checkBookNoExists?bookNo=123&bookType=%D8%AE%D8%A7%D8%B1%D8%AC%D9%8A&bookDate=2023-06-01",
    )
    .await;
    assert_eq!(body_json(free).await["exists"], false);
}

#[tokio::test]
async fn committee_directory_lookups_work_and_404_when_empty() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    create_book_via_http(&app, "5", co, &de_a.to_string(), user).await;

    let response = send_get(app.clone(), "/api/bookFollowUp/committees").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["coID"], co);
    assert_eq!(json[0]["Com"], "اللجنة الادارية");

    let response = send_get(
        app.clone(),
        &format!("/api/bookFollowUp/committees/{co}/departments"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["deID"], de_a);

    // The short alias resolves to the same handler.
    let response = send_get(app.clone(), &format!("/api/bookFollowUp/{co}/departments")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // A committee with no junctions has no departments: 404.
    let response = send_get(app, "/api/bookFollowUp/committees/4242/departments").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pdf_listing_streaming_and_deletion() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    create_book_via_http(&app, "88", co, &de_a.to_string(), user).await;

    let response = send_get(app.clone(), "/api/bookFollowUp/pdf/88").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let pdf_id: i64 = json[0]["id"].as_i64().unwrap();
    let pdf_path: String = json[0]["pdf"].as_str().unwrap().to_string();

    let response = send_get(app.clone(), &format!("/api/bookFollowUp/pdf/file/{pdf_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );

    // Remove the backing file out-of-band; the row still deletes fine.
    std::fs::remove_file(&pdf_path).unwrap();
    let response = send_json(
        app.clone(),
        "DELETE",
        "/api/bookFollowUp/delete_pdf",
        serde_json::json!({"id": pdf_id, "pdf": pdf_path}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_get(app, "/api/bookFollowUp/pdf/88").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn supplements_append_to_a_book() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    let book_id: i64 = create_book_via_http(&app, "44", co, &de_a.to_string(), user).await;

    let body: Vec<u8> = multipart_body(
        &[
            ("bookID", &book_id.to_string()),
            ("userID", &user.to_string()),
        ],
        Some(("scan2.pdf", b"%PDF-extra")),
    );
    let response = send_multipart(
        app.clone(),
        "POST",
        "/api/bookFollowUp/add-supplement",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_get(app, "/api/bookFollowUp/pdf/44").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn late_books_requires_a_user_id() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    create_book_via_http(&app, "L1", co, &de_a.to_string(), user).await;

    // Missing userID: query deserialization rejects the request.
    let response = send_get(app.clone(), "/api/bookFollowUp/lateBooks?page=1&limit=10").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_get(
        app,
        &format!("/api/bookFollowUp/lateBooks?page=1&limit=10&userID={user}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["pdfFiles"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn reports_filter_and_aggregate() {
    let state: AppState = create_test_app_state();
    let (co, de_a, de_b, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    create_book_via_http(&app, "r1", co, &format!("{de_a},{de_b}"), user).await;
    create_book_via_http(&app, "r2", co, &de_a.to_string(), user).await;

    let response = send_get(app.clone(), "/api/bookFollowUp/report").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = send_get(app.clone(), "/api/bookFollowUp/report-with-stats").await;
    let json = body_json(response).await;
    assert_eq!(json["totalRecords"], 2);
    let dept_stats = json["department_stats"].as_array().unwrap();
    let stat_a = dept_stats
        .iter()
        .find(|s| s["deID"] == de_a)
        .unwrap();
    assert_eq!(stat_a["count"], 2);

    let response = send_get(
        app.clone(),
        &format!("/api/bookFollowUp/report-with-stats-department?deID={de_b}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["totalRecords"], 1);

    let response = send_get(app, "/api/bookFollowUp/committees-with-departments").await;
    let json = body_json(response).await;
    assert_eq!(json[0]["totalBooks"], 2);
}

#[tokio::test]
async fn subject_search_hits_and_misses() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    create_book_via_http(&app, "s1", co, &de_a.to_string(), user).await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/bookFollowUp/searchBookSubjects",
        serde_json::json!({"subject": "طلب اجازة اعتيادية"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = send_json(
        app,
        "POST",
        "/api/bookFollowUp/searchBookSubjects",
        serde_json::json!({"subject": "qqqqqqqq"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn counts_endpoints_aggregate() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);
    create_book_via_http(&app, "c1", co, &de_a.to_string(), user).await;

    let response = send_get(app.clone(), "/api/bookFollowUp/counts/book-type").await;
    let json = body_json(response).await;
    assert_eq!(json["External"], 1);
    assert_eq!(json["Internal"], 0);

    let response = send_get(app.clone(), "/api/bookFollowUp/counts/book-status").await;
    let json = body_json(response).await;
    assert_eq!(json["Pending"], 1);

    let response = send_get(app, "/api/bookFollowUp/counts/user-books").await;
    let json = body_json(response).await;
    assert_eq!(json[0]["username"], "archivist");
    assert_eq!(json[0]["bookCount"], 1);
}

/// Extracts the session cookie value from a response.
fn session_cookie_value(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session_token="))
        .map(|v| {
            v.trim_start_matches("session_token=")
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string()
        })
}

#[tokio::test]
async fn register_sets_an_httponly_session_cookie() {
    let state: AppState = create_test_app_state();
    let app: Router = build_router(state);

    let response = send_json(
        app,
        "POST",
        "/auth/register",
        serde_json::json!({"username": "layla", "password": "pw-123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let raw: String = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session_token="))
        .unwrap()
        .to_string();
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("SameSite=Strict"));
    assert!(raw.contains("Path=/"));
}

#[tokio::test]
async fn login_me_and_logout_flow() {
    let state: AppState = create_test_app_state();
    let app: Router = build_router(state);

    let response = send_json(
        app.clone(),
        "POST",
        "/auth/register",
        serde_json::json!({"username": "omar", "password": "pw-123456", "permission": "admin"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(
        app.clone(),
        "POST",
        "/auth/login",
        serde_json::json!({"username": "omar", "password": "pw-123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token: String = session_cookie_value(&response).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::COOKIE, format!("session_token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "omar");
    assert_eq!(json["permission"], "admin");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, format!("session_token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The revoked session no longer validates.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::COOKIE, format!("session_token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let state: AppState = create_test_app_state();
    let app: Router = build_router(state);

    send_json(
        app.clone(),
        "POST",
        "/auth/register",
        serde_json::json!({"username": "noor", "password": "correct-pw"}),
    )
    .await;

    let response = send_json(
        app.clone(),
        "POST",
        "/auth/login",
        serde_json::json!({"username": "noor", "password": "wrong-pw"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_get(app, "/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let state: AppState = create_test_app_state();
    let app: Router = build_router(state);

    send_json(
        app.clone(),
        "POST",
        "/auth/register",
        serde_json::json!({"username": "sami", "password": "pw-123456"}),
    )
    .await;
    let response = send_json(
        app,
        "POST",
        "/auth/register",
        serde_json::json!({"username": "sami", "password": "other-pw"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn secret_books_arrive_without_incoming_fields() {
    let state: AppState = create_test_app_state();
    let (co, de_a, _, user) = seed_base(&state).await;
    let app: Router = build_router(state);

    let body: Vec<u8> = multipart_body(
        &[
            ("bookNo", "س-1"),
            ("bookDate", "2024-01-15"),
            ("bookType", "سري"),
            ("incomingNo", "99"),
            ("incomingDate", "2024-01-10"),
            ("subject", "موضوع سري"),
            ("bookStatus", "قيد الانجاز"),
            ("userID", &user.to_string()),
            ("coID", &co.to_string()),
            ("deIDs", &de_a.to_string()),
        ],
        Some(("scan.pdf", b"%PDF")),
    );
    let response = send_multipart(app.clone(), "POST", "/api/bookFollowUp", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let book_id: i64 = body_json(response).await["bookID"].as_i64().unwrap();

    let response = send_get(
        app,
        &format!("/api/bookFollowUp/getBookFollowUpByBookID/{book_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["bookType"], "سري");
    assert!(json["incomingNo"].is_null());
    assert!(json["incomingDate"].is_null());
}
