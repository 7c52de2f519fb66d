use crate::api::AppState;
use crate::api::schemas::info::{APP_NAME, APP_VERSION, InfoResponse, ROOT_MESSAGE, RootResponse};
use axum::{Json, extract::State};
use time::OffsetDateTime;

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
        hostname: state.system_service.hostname(),
        platform: state.system_service.platform(),
        timestamp: OffsetDateTime::now_utc(),
        environment: state.config.environment,
    })
}

/// Process metadata: name, version, uptime in seconds and a memory sample.
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    let memory = state.system_service.memory_snapshot();
    tracing::debug!(resident_bytes = memory.resident_bytes, "Sampled process memory");

    Json(InfoResponse {
        app: APP_NAME,
        version: APP_VERSION,
        uptime: state.system_service.uptime().as_secs_f64(),
        memory: memory.into(),
    })
}
