//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries per table and are generic over `ConnectionTrait` so the
//! same code runs against the connection pool or inside a transaction.

pub mod catalog;
pub mod customer;
pub mod order;
pub mod review;

#[cfg(test)]
mod tests;

/// Number of rows written per statement by chunked batch writes.
pub const BATCH_SIZE: usize = 100;

/// A chunked batch write failed part-way through.
///
/// Chunks before `applied_chunks` were committed and stay applied.
#[derive(Debug)]
pub struct BatchWriteError {
    pub applied_chunks: usize,
    pub total_chunks: usize,
    pub source: sea_orm::DbErr,
}
