use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::debug;

use super::require_auth;
use crate::{
    api::validation::{validate_btc_address, validate_eth_address},
    error::Error,
    models::ledger::{
        CreateDepositRequest, CreateWithdrawalRequest, Currency, SeedDepositsRequest,
    },
    services::Services,
};

/// POST /api/deposit: record a pending deposit for the logged-in user.
pub async fn create_deposit(
    State(services): State<Services>,
    jar: SignedCookieJar,
    Json(payload): Json<CreateDepositRequest>,
) -> Result<impl IntoResponse, Error> {
    let address = require_auth(&jar)?;
    debug!(user = %address, currency = %payload.currency, "POST deposit");

    let user_id = resolve_user_id(&services, &address).await?;
    let deposit = services.ledger.create_deposit(user_id, payload).await?;
    Ok(Json(deposit))
}

/// POST /api/deposit/mock: seed the demo deposit history for a user.
///
/// Takes an explicit user id instead of the session, as the demo seeding is
/// an operator action.
pub async fn seed_deposits(
    State(services): State<Services>,
    payload: Option<Json<SeedDepositsRequest>>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST deposit mock");
    let user_id = payload
        .and_then(|Json(p)| p.user_id)
        .ok_or_else(|| Error::BadRequest("User ID is required".to_string()))?;

    let seeded = services.ledger.seed_demo_history(user_id).await?;
    Ok(Json(seeded))
}

/// GET /api/withdrawals: withdrawal history of the logged-in user.
pub async fn list_withdrawals(
    State(services): State<Services>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, Error> {
    let address = require_auth(&jar)?;
    debug!(user = %address, "GET withdrawals");

    let user_id = resolve_user_id(&services, &address).await?;
    let withdrawals = services.ledger.withdrawals(user_id).await?;
    Ok(Json(withdrawals))
}

/// POST /api/withdraw: record a pending withdrawal for the logged-in user.
pub async fn create_withdrawal(
    State(services): State<Services>,
    jar: SignedCookieJar,
    Json(payload): Json<CreateWithdrawalRequest>,
) -> Result<impl IntoResponse, Error> {
    let address = require_auth(&jar)?;
    debug!(user = %address, currency = %payload.currency, "POST withdraw");

    match payload.currency {
        Currency::Btc => validate_btc_address(&payload.address)?,
        Currency::Eth => validate_eth_address(&payload.address)?,
    }

    let user_id = resolve_user_id(&services, &address).await?;
    let withdrawal = services.ledger.create_withdrawal(user_id, payload).await?;
    Ok(Json(withdrawal))
}

/// GET /api/balances: demo balances for the logged-in user.
pub async fn balances(
    State(services): State<Services>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, Error> {
    let address = require_auth(&jar)?;
    debug!(user = %address, "GET balances");
    Ok(Json(services.ledger.balances()?))
}

async fn resolve_user_id(
    services: &Services,
    address: &alloy_core::primitives::Address,
) -> Result<i64, Error> {
    services
        .users
        .user_id_by_wallet(address)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))
}
