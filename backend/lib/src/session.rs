//! Signed-cookie session state.
//!
//! The whole session is serialized as JSON into a single signed cookie. The
//! signature only guarantees integrity; a cookie that fails verification or
//! does not deserialize is treated as no session at all.

use alloy_core::primitives::Address;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

use crate::constants::auth::SESSION_COOKIE;
use crate::error::Error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Challenge nonce issued to this session, cleared on successful login
    pub nonce: Option<String>,
    /// Wallet address of the authenticated user
    pub address: Option<Address>,
    /// Chain ID asserted in the verified sign-in message
    pub chain_id: Option<u64>,
    pub is_logged_in: bool,
}

impl SessionData {
    /// Read the session out of the jar. Missing, tampered or unparseable
    /// cookies all yield the default anonymous session.
    pub fn load(jar: &SignedCookieJar) -> Self {
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
            .unwrap_or_default()
    }

    /// Serialize the session back into the jar, refreshing the cookie TTL.
    pub fn store(&self, jar: SignedCookieJar, ttl_secs: u64) -> Result<SignedCookieJar, Error> {
        let value = serde_json::to_string(self).map_err(|_| Error::Internal)?;

        let cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(ttl_secs as i64))
            .build();

        Ok(jar.add(cookie))
    }

    /// Remove the session cookie entirely.
    pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use axum_extra::extract::cookie::Key;

    use super::*;
    use crate::constants::auth::DEV_SESSION_SECRET;

    fn empty_jar() -> SignedCookieJar {
        SignedCookieJar::from_headers(
            &HeaderMap::new(),
            Key::derive_from(DEV_SESSION_SECRET.as_bytes()),
        )
    }

    #[test]
    fn missing_cookie_yields_default_session() {
        let session = SessionData::load(&empty_jar());
        assert_eq!(session, SessionData::default());
        assert!(!session.is_logged_in);
    }

    #[test]
    fn store_then_load_roundtrip() {
        let session = SessionData {
            nonce: Some("abc123".to_string()),
            address: None,
            chain_id: Some(1),
            is_logged_in: false,
        };

        let jar = session.store(empty_jar(), 3600).unwrap();
        assert_eq!(SessionData::load(&jar), session);

        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    }

    #[test]
    fn tampered_cookie_yields_default_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            format!("{SESSION_COOKIE}=forged-value").parse().unwrap(),
        );
        let jar =
            SignedCookieJar::from_headers(&headers, Key::derive_from(DEV_SESSION_SECRET.as_bytes()));

        // The signature check fails, so the cookie is invisible to the jar
        assert!(jar.get(SESSION_COOKIE).is_none());
        assert_eq!(SessionData::load(&jar), SessionData::default());
    }

    #[test]
    fn cookie_signed_with_other_key_is_rejected() {
        let session = SessionData {
            nonce: Some("abc123".to_string()),
            ..Default::default()
        };
        let jar = session.store(empty_jar(), 3600).unwrap();
        let cookie = jar.get(SESSION_COOKIE).unwrap();

        // Replay the cookie value against a jar keyed with a different secret
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            format!("{SESSION_COOKIE}={}", cookie.value()).parse().unwrap(),
        );
        let other_jar = SignedCookieJar::from_headers(
            &headers,
            Key::derive_from(b"another-session-secret-another-session-secret"),
        );
        assert_eq!(SessionData::load(&other_jar), SessionData::default());
    }
}
