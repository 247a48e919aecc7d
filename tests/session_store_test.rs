// ABOUTME: Tests for session persistence and the session lifecycle
// ABOUTME: Load/save/clear of the session file, owner-only permissions, resume, and logout reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use nutrition_diary::config::{GatewayConfig, SessionStore, StoredSession};
use nutrition_diary::errors::ErrorCode;
use nutrition_diary::session::DiarySession;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stored() -> StoredSession {
    StoredSession {
        token: "access-1".to_owned(),
        email: "ana@example.com".to_owned(),
        refresh_token: Some("refresh-1".to_owned()),
    }
}

fn store_in(dir: &TempDir) -> SessionStore {
    SessionStore::new(dir.path().join("nutrition-diary").join("config.json"))
}

#[test]
fn test_missing_file_is_logged_out() -> Result<()> {
    let dir = TempDir::new()?;
    let session = store_in(&dir).load()?;
    assert!(!session.is_logged_in());
    assert!(session.email.is_empty());
    Ok(())
}

#[test]
fn test_save_then_load() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store_in(&dir);

    store.save(&stored())?;
    assert_eq!(store.load()?, stored());

    let raw = std::fs::read_to_string(store.path())?;
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(json["token"], "access-1");
    assert_eq!(json["email"], "ana@example.com");
    Ok(())
}

#[test]
fn test_file_without_refresh_token_loads() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"token":"abc","email":"ana@example.com"}"#)?;

    let session = SessionStore::new(&path).load()?;
    assert!(session.is_logged_in());
    assert_eq!(session.refresh_token, None);
    Ok(())
}

#[test]
fn test_corrupt_file_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json")?;

    let error = SessionStore::new(&path).load().unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_session_file_is_owner_only() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new()?;
    let store = store_in(&dir);
    store.save(&stored())?;

    let mode = std::fs::metadata(store.path())?.permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    Ok(())
}

#[test]
fn test_clear_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store_in(&dir);
    store.save(&stored())?;

    store.clear()?;
    assert!(!store.path().exists());
    store.clear()?;
    Ok(())
}

#[test]
fn test_debug_redacts_tokens() {
    let rendered = format!("{:?}", stored());
    assert!(!rendered.contains("access-1"));
    assert!(!rendered.contains("refresh-1"));
}

#[tokio::test]
async fn test_open_resumes_stored_session() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store_in(&dir);
    store.save(&stored())?;

    let session = DiarySession::open(GatewayConfig::default(), store)?;
    assert!(session.is_logged_in().await);
    assert_eq!(session.email(), "ana@example.com");
    let tokens = session.gateway().tokens().await.unwrap();
    assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-1"));
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_file_and_cache() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store_in(&dir);
    store.save(&stored())?;

    let mut session = DiarySession::open(GatewayConfig::default(), store)?;
    let old_cache = Arc::clone(session.cache());
    session.logout().await?;

    assert!(!session.is_logged_in().await);
    assert!(!session.store().path().exists());
    assert!(session.email().is_empty());
    assert!(!Arc::ptr_eq(&old_cache, session.cache()));
    Ok(())
}

#[tokio::test]
async fn test_login_requires_credentials() -> Result<()> {
    let dir = TempDir::new()?;
    let mut session = DiarySession::open(GatewayConfig::default(), store_in(&dir))?;

    let error = session.login("  ", "pw").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_refresh_without_session_requires_login() -> Result<()> {
    let dir = TempDir::new()?;
    let mut session = DiarySession::open(GatewayConfig::default(), store_in(&dir))?;

    let error = session.refresh().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthRequired);
    Ok(())
}

#[tokio::test]
async fn test_diary_calls_without_login_fail_fast() {
    let dir = TempDir::new().unwrap();
    let session = DiarySession::open(GatewayConfig::default(), store_in(&dir)).unwrap();

    let today = chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let error = session.engine().reconcile(today).await.snapshot.unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthRequired);
}

#[tokio::test]
async fn test_login_starts_a_fresh_cache() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v15/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2",
            "refresh_token": "refresh-2"
        })))
        .mount(&server)
        .await;
    let config = GatewayConfig {
        base_url: server.uri(),
        ..GatewayConfig::default()
    }
    .or_credentials("client", "secret");

    let dir = TempDir::new()?;
    let store = store_in(&dir);
    store.save(&stored())?;
    let mut session = DiarySession::open(config, store)?;
    let old_cache = Arc::clone(session.cache());

    session.login("bo@example.com", "pw").await?;

    assert!(!Arc::ptr_eq(&old_cache, session.cache()));
    assert_eq!(session.email(), "bo@example.com");
    assert_eq!(session.store().load()?.token, "access-2");
    Ok(())
}
