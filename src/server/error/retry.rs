use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient datastore failures)
    Retry,
    /// Failed permanently
    Fail,
}

fn db_err_retry_strategy(db_err: &DbErr) -> ErrorRetryStrategy {
    match db_err {
        // Connection acquisition errors - transient, should retry
        DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
        // Connection errors - transient, should retry
        DbErr::Conn(_) => ErrorRetryStrategy::Retry,

        // Query errors, type conversions, missing records: retrying won't change the outcome
        _ => ErrorRetryStrategy::Fail,
    }
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => db_err_retry_strategy(db_err),

            // Applied chunks are idempotent, so a transient failure can re-run the whole batch
            Self::PartialBatch { source, .. } => db_err_retry_strategy(source),

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::IdentityError(_) => ErrorRetryStrategy::Fail,
            Self::OrderError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
            Self::IoError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
