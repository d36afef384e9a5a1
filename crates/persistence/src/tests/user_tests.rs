// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::fresh_store;
use crate::error::PersistenceError;
use crate::Persistence;

#[test]
fn created_user_round_trips_with_hashed_password() {
    let mut store: Persistence = fresh_store();
    let user_id: i64 = store.create_user("huda", "s3cr3t-pw", "admin").unwrap();

    let user = store.get_user_by_username("huda").unwrap().unwrap();
    assert_eq!(user.user_id, user_id);
    assert_eq!(user.permission, "admin");
    assert_ne!(user.password_hash, "s3cr3t-pw");

    assert!(store.verify_password("s3cr3t-pw", &user.password_hash).unwrap());
    assert!(!store.verify_password("wrong", &user.password_hash).unwrap());

    let by_id = store.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(by_id.username, "huda");
}

#[test]
fn duplicate_usernames_are_rejected() {
    let mut store: Persistence = fresh_store();
    store.create_user("sami", "password1", "user").unwrap();

    let err: PersistenceError = store.create_user("sami", "password2", "user").unwrap_err();
    assert_eq!(err, PersistenceError::DuplicateUsername("sami".to_string()));
}

#[test]
fn unknown_users_are_none() {
    let mut store: Persistence = fresh_store();
    assert!(store.get_user_by_username("nobody").unwrap().is_none());
    assert!(store.get_user_by_id(42).unwrap().is_none());
}

#[test]
fn sessions_round_trip_and_delete() {
    let mut store: Persistence = fresh_store();
    let user_id: i64 = store.create_user("dina", "password1", "user").unwrap();

    store
        .create_session("token-abc", user_id, "2099-01-01T00:00:00Z")
        .unwrap();
    let session = store.get_session_by_token("token-abc").unwrap().unwrap();
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at, "2099-01-01T00:00:00Z");

    store.update_session_activity(session.session_id).unwrap();

    store.delete_session("token-abc").unwrap();
    assert!(store.get_session_by_token("token-abc").unwrap().is_none());
}

#[test]
fn expired_sessions_are_swept() {
    let mut store: Persistence = fresh_store();
    let user_id: i64 = store.create_user("rana", "password1", "user").unwrap();

    // CURRENT_TIMESTAMP formats as "YYYY-MM-DD HH:MM:SS", so a
    // lexicographic comparison against these bounds works.
    store
        .create_session("stale", user_id, "2000-01-01 00:00:00")
        .unwrap();
    store
        .create_session("fresh", user_id, "2099-01-01 00:00:00")
        .unwrap();

    let swept: usize = store.delete_expired_sessions().unwrap();
    assert_eq!(swept, 1);
    assert!(store.get_session_by_token("stale").unwrap().is_none());
    assert!(store.get_session_by_token("fresh").unwrap().is_some());
}
