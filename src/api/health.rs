use crate::api::schemas::health::HealthResponse;
use axum::Json;
use time::OffsetDateTime;

/// Liveness check for load balancers: always healthy while the process can answer.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(OffsetDateTime::now_utc()))
}
