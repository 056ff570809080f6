//! Order scan strategies.
//!
//! The dashboard wants the newest orders of a location, but a sorted and filtered query
//! needs a composite index the datastore may not have. Strategies are tried from the most
//! to the least precise; each one documents what a truncated result means.

use std::future::Future;

use sea_orm::{ConnectionTrait, DbErr};

use crate::server::{data::order::OrderRepository, model::db::OrderModel};

/// Query shapes the stats scan can fall back through, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Location filter, newest first, limited to the row budget.
    ///
    /// Under budget: every matching order was read. At budget: the oldest orders were cut.
    FilteredSorted,
    /// Location filter without sort, limited to the row budget, sorted in memory.
    ///
    /// Under budget: every matching order was read. At budget: an arbitrary subset was read.
    FilteredUnsorted,
    /// No filter and no sort, limited to the row budget; location filtered in memory.
    ///
    /// Under budget: every order was read, so the filtered figures are complete. At budget:
    /// an arbitrary subset of all orders was read, possibly few or none of the location.
    Unfiltered,
}

impl ScanStrategy {
    pub const LADDER: [ScanStrategy; 3] = [
        ScanStrategy::FilteredSorted,
        ScanStrategy::FilteredUnsorted,
        ScanStrategy::Unfiltered,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FilteredSorted => "filtered_sorted",
            Self::FilteredUnsorted => "filtered_unsorted",
            Self::Unfiltered => "unfiltered",
        }
    }
}

/// Source of orders for the stats scan
pub trait OrderScanSource {
    fn scan_orders(
        &self,
        strategy: ScanStrategy,
        location: Option<&str>,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<OrderModel>, DbErr>> + Send;
}

impl<C: ConnectionTrait> OrderScanSource for OrderRepository<'_, C> {
    async fn scan_orders(
        &self,
        strategy: ScanStrategy,
        location: Option<&str>,
        limit: u64,
    ) -> Result<Vec<OrderModel>, DbErr> {
        match strategy {
            ScanStrategy::FilteredSorted => self.scan(location, true, limit).await,
            ScanStrategy::FilteredUnsorted => self.scan(location, false, limit).await,
            ScanStrategy::Unfiltered => self.scan(None, false, limit).await,
        }
    }
}

/// Orders read by one scan, filtered to the location and sorted newest first
#[derive(Debug)]
pub struct ScanResult {
    pub strategy: ScanStrategy,
    pub orders: Vec<OrderModel>,
    /// Rows returned by the datastore before in-memory filtering
    pub rows_scanned: u64,
    /// Whether the scan provably covered every matching order
    pub complete: bool,
}

impl ScanResult {
    fn from_rows(
        strategy: ScanStrategy,
        mut orders: Vec<OrderModel>,
        location: Option<&str>,
        row_budget: u64,
    ) -> Self {
        let rows_scanned = orders.len() as u64;

        if let (ScanStrategy::Unfiltered, Some(location)) = (strategy, location) {
            orders.retain(|order| order.location.as_deref() == Some(location));
        }
        if strategy != ScanStrategy::FilteredSorted {
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        Self {
            strategy,
            orders,
            rows_scanned,
            complete: rows_scanned < row_budget,
        }
    }
}

/// Whether the error means the datastore is unreachable rather than the query unsupported
fn is_connection_error(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

/// Runs the strategy ladder, stepping down on query-unsupported errors
///
/// # Returns
/// - `Ok(ScanResult)` - Orders from the first strategy the datastore accepted
/// - `Err(DbErr)` - A connection failure, or the error of the last strategy when every
///   strategy was rejected
pub async fn scan_with_fallback<S: OrderScanSource>(
    source: &S,
    location: Option<&str>,
    row_budget: u64,
) -> Result<ScanResult, DbErr> {
    let mut last_err = None;

    for strategy in ScanStrategy::LADDER {
        match source.scan_orders(strategy, location, row_budget).await {
            Ok(rows) => return Ok(ScanResult::from_rows(strategy, rows, location, row_budget)),
            Err(e) if is_connection_error(&e) => return Err(e),
            Err(e) => {
                tracing::warn!(
                    strategy = strategy.name(),
                    "Order scan strategy rejected by the datastore, falling back: {}",
                    e
                );
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| DbErr::Custom("no order scan strategy available".to_string())))
}
