//! Integration tests for opening shared links and passing their gates.

mod helpers;

use helpers::{Browser, PUBLIC_BASE_URL, TestApp};
use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_public_link_is_granted_and_downloadable() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    app.put_object("decks/q3.pdf", b"%PDF-1.7 board deck").await;
    let id = app.create_resource(&owner, json!({})).await;

    let response = app.request("GET", &format!("/api/s/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.decision(), "granted");
    assert_eq!(response.body["data"]["resource"]["name"], "Q3 Board Deck");

    let url = response.body["data"]["signed_url"]
        .as_str()
        .expect("granted view carries a signed url");
    let path = url
        .strip_prefix(PUBLIC_BASE_URL)
        .expect("signed url uses the public base");

    let download = app.request("GET", path, None, None).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.bytes, b"%PDF-1.7 board deck");
    assert_eq!(download.content_type.as_deref(), Some("application/pdf"));
}

#[tokio::test]
async fn test_tampered_download_rejected() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    app.put_object("decks/q3.pdf", b"%PDF").await;
    let id = app.create_resource(&owner, json!({})).await;

    let response = app.request("GET", &format!("/api/s/{id}"), None, None).await;
    let url = response.body["data"]["signed_url"].as_str().unwrap();
    let path = url.strip_prefix(PUBLIC_BASE_URL).unwrap();
    let tampered = path.replace("q3.pdf", "q4.pdf");

    let download = app.request("GET", &tampered, None, None).await;
    assert_eq!(download.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_link_is_not_found() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", &format!("/api/s/{}", Uuid::new_v4()), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.decision(), "not_found");
    assert!(response.body["data"].is_null());
}

#[tokio::test]
async fn test_private_link_needs_sign_in() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app
        .create_resource(&owner, json!({ "is_public": false }))
        .await;

    let anonymous = app.request("GET", &format!("/api/s/{id}"), None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.decision(), "unauthenticated");

    let colleague = app.token_for(Uuid::new_v4());
    let signed_in = app
        .request("GET", &format!("/api/s/{id}"), None, Some(&colleague))
        .await;
    assert_eq!(signed_in.status, StatusCode::OK);
    assert_eq!(signed_in.decision(), "granted");
}

#[tokio::test]
async fn test_expired_link_is_gone() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app
        .create_resource(
            &owner,
            json!({
                "is_expiring": true,
                "expires_at": (chrono::Utc::now() - chrono::Duration::minutes(5)).to_rfc3339(),
                "require_password": true,
                "password": "hunter2",
            }),
        )
        .await;

    let response = app.request("GET", &format!("/api/s/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.decision(), "expired");
}

#[tokio::test]
async fn test_full_gate_flow_with_cookies() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app
        .create_resource(
            &owner,
            json!({
                "require_email": true,
                "require_password": true,
                "password": "hunter2",
                "require_nda": true,
                "nda_text": "Do not share.",
            }),
        )
        .await;
    let browser = Browser::new();
    let base = format!("/api/s/{id}");

    let opened = app.send("GET", &base, None, None, Some(&browser)).await;
    assert_eq!(opened.status, StatusCode::OK);
    assert_eq!(opened.decision(), "requires_email");
    assert!(opened.body["data"]["signed_url"].is_null());

    let email = app
        .send(
            "POST",
            &format!("{base}/email"),
            Some(json!({ "email": "viewer@example.com" })),
            None,
            Some(&browser),
        )
        .await;
    assert_eq!(email.status, StatusCode::OK);
    assert_eq!(email.decision(), "requires_password");

    let wrong = app
        .send(
            "POST",
            &format!("{base}/password"),
            Some(json!({ "password": "nope" })),
            None,
            Some(&browser),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let password = app
        .send(
            "POST",
            &format!("{base}/password"),
            Some(json!({ "password": "hunter2" })),
            None,
            Some(&browser),
        )
        .await;
    assert_eq!(password.status, StatusCode::OK);
    assert_eq!(password.decision(), "requires_nda");
    assert_eq!(password.body["data"]["nda_text"], "Do not share.");

    let nda = app
        .send(
            "POST",
            &format!("{base}/nda"),
            Some(json!({ "accepted": true, "signer_name": "Vera Viewer" })),
            None,
            Some(&browser),
        )
        .await;
    assert_eq!(nda.status, StatusCode::OK);
    assert_eq!(nda.decision(), "granted");
    assert!(nda.body["data"]["signed_url"].is_string());

    let revisit = app.send("GET", &base, None, None, Some(&browser)).await;
    assert_eq!(revisit.decision(), "granted");

    let stranger = app.request("GET", &base, None, None).await;
    assert_eq!(stranger.decision(), "requires_email");
}

#[tokio::test]
async fn test_steps_out_of_order_rejected() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app
        .create_resource(
            &owner,
            json!({
                "require_email": true,
                "require_password": true,
                "password": "hunter2",
            }),
        )
        .await;
    let browser = Browser::new();

    let response = app
        .send(
            "POST",
            &format!("/api/s/{id}/password"),
            Some(json!({ "password": "hunter2" })),
            None,
            Some(&browser),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(browser.len(), 0);
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app
        .create_resource(&owner, json!({ "require_email": true }))
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/s/{id}/email"),
            Some(json!({ "email": "not-an-email" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_feedback_recorded_and_listed_for_owner() {
    let app = TestApp::new().await;
    let owner_id = Uuid::new_v4();
    let owner = app.token_for(owner_id);
    let id = app
        .create_resource(
            &owner,
            json!({ "require_email": true, "feedback_enabled": true }),
        )
        .await;
    let browser = Browser::new();
    let base = format!("/api/s/{id}");

    let early = app
        .send(
            "POST",
            &format!("{base}/feedback"),
            Some(json!({ "message": "Looks good" })),
            None,
            Some(&browser),
        )
        .await;
    assert_eq!(early.status, StatusCode::FORBIDDEN);

    let email = app
        .send(
            "POST",
            &format!("{base}/email"),
            Some(json!({ "email": "Viewer@Example.com" })),
            None,
            Some(&browser),
        )
        .await;
    assert_eq!(email.decision(), "granted");

    let feedback = app
        .send(
            "POST",
            &format!("{base}/feedback"),
            Some(json!({ "message": "  Looks good  " })),
            None,
            Some(&browser),
        )
        .await;
    assert_eq!(feedback.status, StatusCode::CREATED);
    assert_eq!(feedback.body["data"]["message"], "Looks good");

    let listed = app
        .request("GET", &format!("/api/resources/{id}/feedback"), None, Some(&owner))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let items = listed.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["viewer_email"], "Viewer@Example.com");

    let analytics = app
        .request("GET", &format!("/api/resources/{id}/analytics"), None, Some(&owner))
        .await;
    assert_eq!(analytics.status, StatusCode::OK);
    assert_eq!(analytics.body["data"]["total_views"], 1);
    assert_eq!(analytics.body["data"]["unique_viewers"], 1);
}

#[tokio::test]
async fn test_feedback_disabled_is_forbidden() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let id = app.create_resource(&owner, json!({})).await;

    let response = app
        .request(
            "POST",
            &format!("/api/s/{id}/feedback"),
            Some(json!({ "message": "hello" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_verification_cookie_cannot_be_moved_between_links() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let link_a = app
        .create_resource(&owner, json!({ "require_email": true }))
        .await;
    let link_b = app
        .create_resource(
            &owner,
            json!({
                "require_password": true,
                "password": "hunter2",
                "require_nda": true,
                "nda_text": "Confidential.",
            }),
        )
        .await;

    let viewer = Browser::new();
    let email = app
        .send(
            "POST",
            &format!("/api/s/{link_a}/email"),
            Some(json!({ "email": "anyone@example.com" })),
            None,
            Some(&viewer),
        )
        .await;
    assert_eq!(email.decision(), "granted");
    let value = viewer
        .get(&format!("ds_verify_email_{}", link_a.simple()))
        .expect("email verification cookie set");

    let renamed = Browser::new();
    renamed.set(&format!("ds_verify_password_{}", link_b.simple()), &value);
    renamed.set(&format!("ds_verify_nda_{}", link_b.simple()), &value);
    let response = app
        .send("GET", &format!("/api/s/{link_b}"), None, None, Some(&renamed))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.decision(), "requires_password");
    assert!(response.body["data"]["signed_url"].is_null());
}

#[tokio::test]
async fn test_missing_or_expired_link_wins_over_bad_body() {
    let app = TestApp::new().await;
    let owner = app.token_for(Uuid::new_v4());
    let missing = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/api/s/{missing}/email"),
            Some(json!({ "email": "not-an-email" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let expired = app
        .create_resource(
            &owner,
            json!({
                "is_expiring": true,
                "expires_at": (chrono::Utc::now() - chrono::Duration::minutes(1)).to_rfc3339(),
                "require_nda": true,
                "nda_text": "Confidential.",
                "feedback_enabled": true,
            }),
        )
        .await;
    let response = app
        .request(
            "POST",
            &format!("/api/s/{expired}/nda"),
            Some(json!({ "accepted": false })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::GONE);

    let response = app
        .request(
            "POST",
            &format!("/api/s/{expired}/feedback"),
            Some(json!({ "message": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::GONE);
}
