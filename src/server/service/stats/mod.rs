//! Dashboard statistics.
//!
//! Figures come from one bounded scan of recent orders rather than a full table scan, so
//! every response reports the strategy used and whether the row budget cut it short.

pub mod aggregate;
pub mod strategy;

#[cfg(test)]
mod tests;

use chrono::Utc;
use sea_orm::ConnectionTrait;

use crate::{
    model::stats::{DashboardStats, ScanReport},
    server::{
        data::{catalog::CatalogRepository, order::item::OrderItemRepository, order::OrderRepository},
        error::Error,
        service::stats::strategy::{scan_with_fallback, OrderScanSource},
    },
};

pub struct StatsService<'a, C: ConnectionTrait> {
    db: &'a C,
    row_budget: u64,
}

impl<'a, C: ConnectionTrait> StatsService<'a, C> {
    /// Creates a new instance of [`StatsService`]
    ///
    /// # Arguments
    /// - `row_budget`: Maximum number of orders a single scan may read
    pub fn new(db: &'a C, row_budget: u64) -> Self {
        Self { db, row_budget }
    }

    /// Computes the dashboard figures, optionally for a single location
    pub async fn compute_stats(&self, location: Option<&str>) -> Result<DashboardStats, Error> {
        self.compute_stats_from(&OrderRepository::new(self.db), location)
            .await
    }

    /// Computes the dashboard figures from orders read through `source`
    pub async fn compute_stats_from<S: OrderScanSource>(
        &self,
        source: &S,
        location: Option<&str>,
    ) -> Result<DashboardStats, Error> {
        let now = Utc::now();
        let scan = scan_with_fallback(source, location, self.row_budget).await?;

        let order_ids = aggregate::top_product_order_ids(&scan.orders, now);
        let items = OrderItemRepository::new(self.db)
            .get_by_order_ids(&order_ids)
            .await?;
        let product_count = CatalogRepository::new(self.db).count_products().await?;

        let figures = aggregate::aggregate(&scan.orders, &items, now);

        if !scan.complete {
            tracing::warn!(
                strategy = scan.strategy.name(),
                row_budget = self.row_budget,
                location = ?location,
                "Order scan hit the row budget, dashboard figures are partial"
            );
        }

        Ok(DashboardStats {
            revenue: figures.revenue,
            orders: figures.orders,
            payment_methods: figures.payment_methods,
            top_products: figures.top_products,
            product_count,
            scan: ScanReport {
                strategy: scan.strategy.name().to_string(),
                rows_scanned: scan.rows_scanned,
                rows_used: scan.orders.len() as u64,
                row_budget: self.row_budget,
                complete: scan.complete,
            },
            generated_at: now,
        })
    }
}
