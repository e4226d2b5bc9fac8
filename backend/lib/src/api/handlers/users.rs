use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::debug;

use super::require_auth;
use crate::{
    error::Error,
    models::users::CreateUserRequest,
    services::Services,
};

/// GET /api/user: profile of the logged-in wallet user.
pub async fn profile(
    State(services): State<Services>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, Error> {
    let address = require_auth(&jar)?;
    debug!(user = %address, "GET user profile");
    let response = services.users.profile(&address).await?;
    Ok(Json(response))
}

/// POST /api/user/create: federated find-or-create.
///
/// This mirrors a trusted-backend callback after an external identity
/// provider has authenticated the user, so it does not use the wallet
/// session.
pub async fn create_user(
    State(services): State<Services>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST user create");
    let response = services.users.create_federated(payload).await?;
    Ok(Json(response))
}
