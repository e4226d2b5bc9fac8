//! Sign-In with Ethereum handlers.
//!
//! Session state lives in a signed cookie, so every mutation path returns the
//! updated jar alongside the response body. The session is only promoted to
//! logged-in after verification and the identity upsert both succeed.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::debug;

use crate::{
    error::Error,
    models::auth::{NonceResponse, VerifyRequest, VerifyResponse},
    services::Services,
    session::SessionData,
};

/// GET /api/auth/siwe: issue a challenge nonce and stash it in the session.
pub async fn nonce(
    State(services): State<Services>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, Error> {
    debug!("GET auth challenge");
    let nonce = services.auth.challenge();

    let mut session = SessionData::load(&jar);
    session.nonce = Some(nonce.clone());
    let jar = session.store(jar, services.config.auth.session_ttl_secs)?;

    Ok((jar, Json(NonceResponse { nonce })))
}

/// POST /api/auth/siwe: verify the signed message and log the session in.
pub async fn verify(
    State(services): State<Services>,
    jar: SignedCookieJar,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST auth verify");

    // A missing body, malformed JSON and absent fields all collapse into the
    // same client error
    let missing = || Error::BadRequest("Missing message or signature".to_string());
    let Ok(Json(payload)) = payload else {
        return Err(missing());
    };
    let (Some(message), Some(signature)) = (payload.message, payload.signature) else {
        return Err(missing());
    };

    let session = SessionData::load(&jar);
    let outcome = services
        .auth
        .login(&message, &signature, session.nonce.as_deref())
        .await?;

    // The nonce is single-use: consumed here, a replay needs a new challenge
    let session = SessionData {
        nonce: None,
        address: Some(outcome.address),
        chain_id: Some(outcome.chain_id),
        is_logged_in: true,
    };
    let jar = session.store(jar, services.config.auth.session_ttl_secs)?;

    Ok((
        jar,
        Json(VerifyResponse {
            success: true,
            address: outcome.address,
        }),
    ))
}

/// POST /api/auth/logout: drop the session cookie.
pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    debug!("POST auth logout");
    (SessionData::clear(jar), StatusCode::NO_CONTENT)
}
