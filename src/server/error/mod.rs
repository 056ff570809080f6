//! Error types for the storefront server.
//!
//! Each domain (configuration, identity, orders) owns a `thiserror` enum that knows how to
//! turn itself into an HTTP response. `Error` aggregates them together with the external
//! library errors so services can use `?` throughout.

pub mod config;
pub mod identity;
pub mod order;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, identity::IdentityError, order::OrderError},
};

/// Main error type for the storefront server.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Identity errors (invalid login payload, unknown customer)
/// - Order errors (unknown order, invalid action, invalid checkout payload)
/// - Partial batch failures (some chunks of a batch write were applied)
/// - External library errors (database, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Identity reconciliation error.
    #[error(transparent)]
    IdentityError(#[from] IdentityError),
    /// Order lookup, validation or state machine error.
    #[error(transparent)]
    OrderError(#[from] OrderError),
    /// A chunked batch write failed after some chunks were already committed.
    ///
    /// Earlier chunks stay applied; the operation is safe to re-run.
    #[error(
        "Batch {operation} failed after {applied_chunks} of {total_chunks} chunk(s) were applied: {source}"
    )]
    PartialBatch {
        operation: String,
        applied_chunks: usize,
        total_chunks: usize,
        #[source]
        source: sea_orm::DbErr,
    },
    /// Internal error indicating a bug in the server's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// Failed to bind or serve the HTTP listener.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Invalid identity payload, invalid order action or checkout payload
/// - 404 Not Found - Unknown order or customer
/// - 409 Conflict - Order changed concurrently while a transition was applied
/// - 500 Internal Server Error - Partial batch failures name the operation and how many
///   chunks were applied; all other errors get a generic message (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::IdentityError(err) => err.into_response(),
            Self::OrderError(err) => err.into_response(),
            Self::PartialBatch {
                operation,
                applied_chunks,
                total_chunks,
                source,
            } => {
                tracing::error!(
                    operation = %operation,
                    applied_chunks,
                    total_chunks,
                    "Batch write failed part-way: {}",
                    source
                );

                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!(
                        "Batch {} failed after {} of {} chunk(s) were applied, re-run to finish",
                        operation, applied_chunks, total_chunks
                    ),
                )
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Build a JSON error response with the provided status code.
pub(crate) fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorDto { error: message })).into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error and returns a generic message so implementation details never reach
/// the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    }
}

impl Error {
    /// Name the batch operation a [`BatchWriteError`] came from.
    pub fn partial_batch(operation: &str, err: crate::server::data::BatchWriteError) -> Self {
        Self::PartialBatch {
            operation: operation.to_string(),
            applied_chunks: err.applied_chunks,
            total_chunks: err.total_chunks,
            source: err.source,
        }
    }
}
