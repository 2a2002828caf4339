use axum::http::StatusCode;

/// Liveness probe; does not touch the database or the external services
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
