use axum::{extract::State, response::IntoResponse, Json};

use crate::services::Services;

/// GET /health: liveness plus a database connectivity probe.
pub async fn health_check(State(services): State<Services>) -> impl IntoResponse {
    Json(services.health.check().await)
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::api::mock_app;

    #[tokio::test]
    async fn health_reports_ok_with_mock_store() {
        let server = TestServer::new(mock_app()).unwrap();

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "wallet-backend");
        assert_eq!(body["components"]["database"], "ok");
    }
}
