//! Shared test helpers for integration tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use docusend_auth::JwtEncoder;
use docusend_core::config::AppConfig;
use docusend_database::Repositories;
use docusend_storage::StorageManager;

/// Base URL signed download links are minted under.
pub const PUBLIC_BASE_URL: &str = "http://docs.test";

/// Test application context.
///
/// Runs against in-memory repositories and a temporary storage root, so
/// no external services are needed.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Storage root, removed on drop
    pub storage_dir: TempDir,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "database": { "provider": "memory" },
            "auth": { "jwt_secret": "integration-jwt-secret" },
            "verification": {
                "cookie_secret": "integration-cookie-secret",
                "secure_cookies": false,
                "nda_ttl_seconds": 600
            },
            "storage": {
                "provider": "local",
                "signed_url_ttl_seconds": 300,
                "local": {
                    "root_path": storage_dir.path().to_string_lossy(),
                    "signing_secret": "integration-signing-secret",
                    "public_base_url": PUBLIC_BASE_URL
                }
            },
            "logging": { "level": "warn", "format": "pretty" }
        }))
        .expect("Failed to build test config");

        let repos = Repositories::in_memory();
        let storage = StorageManager::new(&config.storage)
            .await
            .expect("Failed to init storage");
        let router = docusend_api::build_app(config.clone(), repos, storage)
            .expect("Failed to build app");
        let encoder = JwtEncoder::new(&config.auth);

        Self {
            router,
            config,
            storage_dir,
            encoder,
        }
    }

    /// Issue an access token for a fresh user id.
    pub fn token_for(&self, user_id: Uuid) -> String {
        self.encoder
            .access_token(user_id, Some("owner@test.com"))
            .expect("Failed to issue token")
    }

    /// Put an object into the storage root.
    pub async fn put_object(&self, path: &str, bytes: &[u8]) {
        let full = self.storage_dir.path().join(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .expect("Failed to create object dir");
        }
        tokio::fs::write(full, bytes)
            .await
            .expect("Failed to write object");
    }

    /// Create a resource as `token`'s owner and return its id.
    ///
    /// `overrides` is merged over a public document with no requirements.
    pub async fn create_resource(&self, token: &str, overrides: Value) -> Uuid {
        let mut body = serde_json::json!({
            "name": "Q3 Board Deck",
            "kind": "document",
            "storage_path": "decks/q3.pdf",
            "is_public": true,
        });
        if let (Some(base), Value::Object(extra)) = (body.as_object_mut(), overrides) {
            base.extend(extra);
        }

        let response = self
            .request("POST", "/api/resources", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No id in create response")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, body, token, None).await
    }

    /// Send a request, optionally carrying a browser's cookies.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        browser: Option<&Browser>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(cookie) = browser.and_then(Browser::cookie_header) {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        if let Some(browser) = browser {
            browser.absorb(&set_cookies);
        }

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            bytes: body_bytes.to_vec(),
            content_type,
        }
    }
}

/// A cookie jar that follows `Set-Cookie` like a browser would.
#[derive(Debug, Default)]
pub struct Browser {
    cookies: Mutex<BTreeMap<String, String>>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.lock().expect("cookie jar poisoned");
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    fn absorb(&self, set_cookies: &[String]) {
        let mut cookies = self.cookies.lock().expect("cookie jar poisoned");
        for line in set_cookies {
            let pair = line.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                cookies.insert(name.trim().to_string(), value.trim().to_string());
            }
        }
    }

    /// Raw (signed) value of a cookie.
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .lock()
            .expect("cookie jar poisoned")
            .get(name)
            .cloned()
    }

    /// Store a cookie as if the server had set it.
    pub fn set(&self, name: &str, value: &str) {
        self.cookies
            .lock()
            .expect("cookie jar poisoned")
            .insert(name.to_string(), value.to_string());
    }

    /// Number of cookies held.
    pub fn len(&self) -> usize {
        self.cookies.lock().expect("cookie jar poisoned").len()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Content-Type header
    pub content_type: Option<String>,
}

impl TestResponse {
    /// The gate decision in a success or error body.
    pub fn decision(&self) -> &str {
        self.body["data"]["decision"]
            .as_str()
            .or_else(|| self.body["details"]["decision"].as_str())
            .unwrap_or_default()
    }
}
