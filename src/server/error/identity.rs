use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Customer {0} not found")]
    CustomerNotFound(String),
    #[error("Invalid identity for stable id {stable_id:?}: {reason}")]
    InvalidIdentity { stable_id: String, reason: String },
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CustomerNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidIdentity { .. } => StatusCode::BAD_REQUEST,
        };

        error_response(status, self.to_string())
    }
}
