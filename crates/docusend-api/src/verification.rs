//! Verification store backed by signed browser cookies.
//!
//! One cookie per (resource, requirement): `ds_verify_<kind>_<resource>`.
//! The value is `<resource>:<kind>:<expiry>`, where expiry is unix seconds
//! or `forever`. The signature covers only the value, so `has` checks the
//! resource and kind embedded in it rather than the cookie name, along with
//! the expiry.

use std::sync::Mutex;

use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use docusend_core::error::AppError;
use docusend_core::result::AppResult;
use docusend_core::traits::VerificationStore;
use docusend_core::types::{RequirementKind, VerificationTtl};

/// Cookie holding the email captured by the email gate.
pub const EMAIL_COOKIE: &str = "ds_viewer_email";

const FOREVER: &str = "forever";

/// Name of the cookie carrying `kind` for `resource_id`.
pub fn cookie_name(resource_id: Uuid, kind: RequirementKind) -> String {
    format!("ds_verify_{}_{}", kind.as_str(), resource_id.simple())
}

/// Request-scoped store over the viewer's signed cookie jar.
///
/// Writes are visible to later reads in the same request and are sent back
/// to the browser when the jar is returned from the handler.
#[derive(Debug)]
pub struct CookieVerificationStore {
    jar: Mutex<SignedCookieJar>,
    secure: bool,
    now: DateTime<Utc>,
}

impl CookieVerificationStore {
    /// Wrap the jar extracted for this request.
    pub fn new(jar: SignedCookieJar, secure: bool, now: DateTime<Utc>) -> Self {
        Self {
            jar: Mutex::new(jar),
            secure,
            now,
        }
    }

    /// Remember the viewer's email for later view events.
    pub fn remember_email(&self, email: &str) -> AppResult<()> {
        let cookie = self.cookie(EMAIL_COOKIE.to_string(), email.to_string(), None);
        self.update(|jar| jar.add(cookie))
    }

    /// The jar with every cookie written during the request.
    pub fn into_jar(self) -> SignedCookieJar {
        self.jar
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cookie(&self, name: String, value: String, ttl: Option<std::time::Duration>) -> Cookie<'static> {
        let builder = Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        match ttl {
            Some(ttl) => builder
                .max_age(time::Duration::seconds(ttl.as_secs() as i64))
                .build(),
            None => builder.permanent().build(),
        }
    }

    fn update(&self, f: impl FnOnce(SignedCookieJar) -> SignedCookieJar) -> AppResult<()> {
        let mut jar = self
            .jar
            .lock()
            .map_err(|_| AppError::cache("Cookie jar lock poisoned"))?;
        *jar = f(jar.clone());
        Ok(())
    }

    /// Whether `value` is a live record for exactly this resource and kind.
    fn is_live(&self, value: &str, resource_id: Uuid, kind: RequirementKind) -> bool {
        let mut parts = value.splitn(3, ':');
        let (Some(resource), Some(recorded_kind), Some(expiry)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if resource != resource_id.simple().to_string() || recorded_kind != kind.as_str() {
            return false;
        }
        if expiry == FOREVER {
            return true;
        }
        expiry
            .parse::<i64>()
            .map(|expires| self.now.timestamp() < expires)
            .unwrap_or(false)
    }
}

#[async_trait]
impl VerificationStore for CookieVerificationStore {
    async fn has(&self, resource_id: Uuid, kind: RequirementKind) -> AppResult<bool> {
        let jar = self
            .jar
            .lock()
            .map_err(|_| AppError::cache("Cookie jar lock poisoned"))?;
        Ok(jar
            .get(&cookie_name(resource_id, kind))
            .is_some_and(|c| self.is_live(c.value(), resource_id, kind)))
    }

    async fn set(
        &self,
        resource_id: Uuid,
        kind: RequirementKind,
        ttl: VerificationTtl,
    ) -> AppResult<()> {
        let ttl = ttl.as_duration();
        let expiry = match ttl {
            Some(d) => (self.now.timestamp() + d.as_secs() as i64).to_string(),
            None => FOREVER.to_string(),
        };
        let value = format!("{}:{}:{}", resource_id.simple(), kind.as_str(), expiry);
        debug!(%resource_id, %kind, "Setting verification cookie");
        let cookie = self.cookie(cookie_name(resource_id, kind), value, ttl);
        self.update(|jar| jar.add(cookie))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::{HeaderMap, header};
    use axum::response::IntoResponse;
    use axum_extra::extract::cookie::Key;

    use super::*;

    fn store(jar: SignedCookieJar, now: DateTime<Utc>) -> CookieVerificationStore {
        CookieVerificationStore::new(jar, false, now)
    }

    #[tokio::test]
    async fn test_set_visible_in_same_request() {
        let key = Key::generate();
        let s = store(SignedCookieJar::new(key), Utc::now());
        let id = Uuid::new_v4();
        assert!(!s.has(id, RequirementKind::Password).await.unwrap());
        s.set(id, RequirementKind::Password, VerificationTtl::Forever)
            .await
            .unwrap();
        assert!(s.has(id, RequirementKind::Password).await.unwrap());
        assert!(!s.has(id, RequirementKind::Nda).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_value_rejected_even_if_cookie_replayed() {
        let key = Key::generate();
        let id = Uuid::new_v4();
        let then = Utc::now();
        let s = store(SignedCookieJar::new(key.clone()), then);
        s.set(
            id,
            RequirementKind::Nda,
            VerificationTtl::For(Duration::from_secs(600)),
        )
        .await
        .unwrap();
        let jar = s.into_jar();

        let later = store(jar.clone(), then + chrono::Duration::seconds(601));
        assert!(!later.has(id, RequirementKind::Nda).await.unwrap());
        let sooner = store(jar, then + chrono::Duration::seconds(599));
        assert!(sooner.has(id, RequirementKind::Nda).await.unwrap());
    }

    /// The signed `Set-Cookie` value the jar would send for `name`.
    fn signed_value(jar: SignedCookieJar, name: &str) -> String {
        let response = jar.into_response();
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|line| line.split(';').next())
            .find_map(|pair| pair.strip_prefix(&format!("{name}=")))
            .map(str::to_string)
            .unwrap()
    }

    #[tokio::test]
    async fn test_renamed_cookie_does_not_satisfy_other_record() {
        let key = Key::generate();
        let link_a = Uuid::new_v4();
        let link_b = Uuid::new_v4();

        let s = store(SignedCookieJar::new(key.clone()), Utc::now());
        s.set(link_a, RequirementKind::Email, VerificationTtl::Forever)
            .await
            .unwrap();
        let value = signed_value(
            s.into_jar(),
            &cookie_name(link_a, RequirementKind::Email),
        );

        for (id, kind) in [
            (link_a, RequirementKind::Password),
            (link_b, RequirementKind::Email),
            (link_b, RequirementKind::Nda),
        ] {
            let mut headers = HeaderMap::new();
            let renamed = format!("{}={}", cookie_name(id, kind), value);
            headers.insert(header::COOKIE, renamed.parse().unwrap());
            let s = store(SignedCookieJar::from_headers(&headers, key.clone()), Utc::now());
            assert!(!s.has(id, kind).await.unwrap(), "{kind} on {id} accepted");
        }

        let mut headers = HeaderMap::new();
        let original = format!("{}={}", cookie_name(link_a, RequirementKind::Email), value);
        headers.insert(header::COOKIE, original.parse().unwrap());
        let s = store(SignedCookieJar::from_headers(&headers, key), Utc::now());
        assert!(s.has(link_a, RequirementKind::Email).await.unwrap());
    }

    #[tokio::test]
    async fn test_unsigned_cookie_ignored() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        let forged = format!(
            "{}={}:email:forever",
            cookie_name(id, RequirementKind::Email),
            id.simple()
        );
        headers.insert(header::COOKIE, forged.parse().unwrap());

        let jar = SignedCookieJar::from_headers(&headers, Key::generate());
        let s = store(jar, Utc::now());
        assert!(!s.has(id, RequirementKind::Email).await.unwrap());
    }
}
