use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Startup configuration errors, reported before the server binds its listener.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
}

impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        tracing::error!("Configuration error surfaced in a request: {}", self);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server is misconfigured".to_string(),
        )
    }
}
