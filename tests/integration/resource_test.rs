//! Integration tests for owner resource management.

mod helpers;

use helpers::TestApp;
use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_owner_routes_require_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/resources", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/resources", None, Some("not.a.jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_get_and_list() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app
        .create_resource(
            &owner,
            json!({ "require_password": true, "password": "hunter2" }),
        )
        .await;

    let fetched = app
        .request("GET", &format!("/api/resources/{id}"), None, Some(&owner))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["require_password"], true);
    assert!(fetched.body["data"].get("password_hash").is_none());

    let listed = app
        .request("GET", "/api/resources", None, Some(&owner))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let other = app.token_for(Uuid::new_v4());
    let theirs = app.request("GET", "/api/resources", None, Some(&other)).await;
    assert_eq!(theirs.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_other_owner_forbidden() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app.create_resource(&owner, json!({})).await;
    let other = app.token_for(Uuid::new_v4());

    let response = app
        .request("GET", &format!("/api/resources/{id}"), None, Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "GET",
            &format!("/api/resources/{id}/analytics"),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/resources/{id}"), None, Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_settings_rejected() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());

    let response = app
        .request(
            "POST",
            "/api/resources",
            Some(json!({
                "name": "Deck",
                "kind": "document",
                "storage_path": "deck.pdf",
                "require_password": true,
            })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/resources",
            Some(json!({
                "name": "Deck",
                "kind": "document",
                "storage_path": "../outside.pdf",
            })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_changes_gate() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app.create_resource(&owner, json!({})).await;

    let before = app.request("GET", &format!("/api/s/{id}"), None, None).await;
    assert_eq!(before.decision(), "granted");

    let updated = app
        .request(
            "PUT",
            &format!("/api/resources/{id}"),
            Some(json!({ "require_nda": true, "nda_text": "Confidential." })),
            Some(&owner),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["require_nda"], true);

    let after = app.request("GET", &format!("/api/s/{id}"), None, None).await;
    assert_eq!(after.decision(), "requires_nda");
    assert_eq!(after.body["data"]["nda_text"], "Confidential.");
}

#[tokio::test]
async fn test_delete_removes_link_and_object() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    app.put_object("decks/q3.pdf", b"%PDF").await;
    let id = app.create_resource(&owner, json!({})).await;

    let response = app
        .request("DELETE", &format!("/api/resources/{id}"), None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(!app.storage_dir.path().join("decks/q3.pdf").exists());

    let response = app.request("GET", &format!("/api/s/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], true);
    assert_eq!(response.body["data"]["storage"], true);
}
