//! `Viewer` extractor: everything the access flow needs about the
//! requester of a shared link.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use tracing::debug;

use docusend_service::context::ViewerContext;

use super::auth::claims;
use crate::error::ApiError;
use crate::state::AppState;
use crate::verification::{CookieVerificationStore, EMAIL_COOKIE};

/// Headers edge proxies use to pass the viewer's country.
const COUNTRY_HEADERS: [&str; 2] = ["cf-ipcountry", "x-country-code"];

/// A (possibly anonymous) viewer and their verification cookies.
#[derive(Debug)]
pub struct Viewer {
    pub context: ViewerContext,
    pub store: CookieVerificationStore,
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(jar) = SignedCookieJar::<Key>::from_request_parts(parts, state).await;

        let mut context = ViewerContext::anonymous();
        match claims(parts, state).await {
            Some(Ok(claims)) => {
                context.user_id = Some(claims.user_id());
                context.email = claims.email;
            }
            Some(Err(e)) => debug!(error = %e, "Ignoring invalid viewer token"),
            None => {}
        }
        if let Some(cookie) = jar.get(EMAIL_COOKIE) {
            context.email = Some(cookie.value().to_string());
        }
        context.user_agent = header(parts, "user-agent");
        context.country = COUNTRY_HEADERS
            .iter()
            .find_map(|h| header(parts, h))
            .filter(|c| c.len() == 2 && c != "XX");

        let store = CookieVerificationStore::new(
            jar,
            state.config.verification.secure_cookies,
            context.request_time,
        );
        Ok(Self { context, store })
    }
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
