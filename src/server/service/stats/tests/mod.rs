use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{OrderStatus, PaymentMethod, PaymentStatus};
use sea_orm::DbErr;
use storefront_test_utils::prelude::*;

use crate::server::{
    data::order::OrderRepository,
    model::db::OrderModel,
    service::stats::{
        aggregate::aggregate,
        strategy::{scan_with_fallback, OrderScanSource, ScanStrategy},
        StatsService,
    },
};

mod aggregate;

/// Order created `days_ago` days before now with the given status
fn order_at(order_id: &str, status: OrderStatus, total: i64, days_ago: i64) -> OrderModel {
    let created_at = (Utc::now() - Duration::days(days_ago)).naive_utc();
    let payment_status = match status {
        OrderStatus::Approved => PaymentStatus::Paid,
        _ => PaymentStatus::Pending,
    };

    OrderModel {
        status,
        payment_status,
        created_at,
        updated_at: created_at,
        ..factory::mock_order(order_id, "uid-1", "buyer@example.com", total)
    }
}

fn located(order: OrderModel, location: &str) -> OrderModel {
    OrderModel {
        location: Some(location.to_string()),
        ..order
    }
}

/// Scan source whose datastore rejects some strategies
struct RejectingSource<'a> {
    orders: OrderRepository<'a, sea_orm::DatabaseConnection>,
    rejected: Vec<ScanStrategy>,
    error: fn() -> DbErr,
}

impl OrderScanSource for RejectingSource<'_> {
    async fn scan_orders(
        &self,
        strategy: ScanStrategy,
        location: Option<&str>,
        limit: u64,
    ) -> Result<Vec<OrderModel>, DbErr> {
        if self.rejected.contains(&strategy) {
            return Err((self.error)());
        }

        self.orders.scan_orders(strategy, location, limit).await
    }
}

fn missing_index() -> DbErr {
    DbErr::Custom("query requires a composite index".to_string())
}

fn connection_lost() -> DbErr {
    DbErr::Conn(sea_orm::RuntimeErr::Internal("connection reset".to_string()))
}
