//! Route definitions for the wallet demo API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::constants::auth::AUTH_SIWE_ENDPOINT;
use crate::services::Services;

/// Creates the router with all API routes
pub fn routes(services: Services) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        // Sign-In with Ethereum: GET issues the challenge, POST verifies it
        .route(AUTH_SIWE_ENDPOINT, get(handlers::nonce).post(handlers::verify))
        .route("/api/auth/logout", post(handlers::logout))
        // User endpoints
        .route("/api/user", get(handlers::profile))
        .route("/api/user/create", post(handlers::create_user))
        // Ledger endpoints
        .route("/api/deposit", post(handlers::create_deposit))
        .route("/api/deposit/mock", post(handlers::seed_deposits))
        .route("/api/withdrawals", get(handlers::list_withdrawals))
        .route("/api/withdraw", post(handlers::create_withdrawal))
        .route("/api/balances", get(handlers::balances))
        // Add state to all routes
        .with_state(services)
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::api::mock_app;

    #[tokio::test]
    async fn health_route_is_wired() {
        let server = TestServer::new(mock_app()).unwrap();

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let json: serde_json::Value = response.json();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let server = TestServer::new(mock_app()).unwrap();

        let response = server.get("/api/does-not-exist").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn protected_routes_require_a_session() {
        let server = TestServer::new(mock_app()).unwrap();

        for path in ["/api/user", "/api/withdrawals", "/api/balances"] {
            let response = server.get(path).await;
            assert_eq!(
                response.status_code(),
                StatusCode::UNAUTHORIZED,
                "GET {path}"
            );
        }
    }
}
