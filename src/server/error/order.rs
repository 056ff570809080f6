use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Order {0} not found")]
    NotFound(String),
    /// Rejected before any write was attempted.
    #[error("Invalid action {action:?} for order {order_id}: {reason}")]
    InvalidAction {
        order_id: String,
        action: String,
        reason: String,
    },
    #[error("Invalid order {order_id}: {reason}")]
    InvalidOrder { order_id: String, reason: String },
    /// The order's status changed between reading it and writing the transition.
    #[error("Order {order_id} was modified concurrently while applying {action:?}")]
    ConcurrentModification { order_id: String, action: String },
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidAction { .. } | Self::InvalidOrder { .. } => StatusCode::BAD_REQUEST,
            Self::ConcurrentModification { .. } => StatusCode::CONFLICT,
        };

        error_response(status, self.to_string())
    }
}
