use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => {
                tracing::debug!("Route not found");
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Failures while bringing the listener up or serving connections.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid listen address {host}:{port}: {source}")]
    InvalidAddress {
        host: String,
        port: u16,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("Failed to bind port {port} on {addr}: {source}")]
    Bind {
        port: u16,
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
