use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard figures computed from one bounded scan of recent orders
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DashboardStats {
    pub revenue: RevenueStats,
    pub orders: OrderCountStats,
    pub payment_methods: Vec<PaymentMethodStat>,
    /// Top products by quantity sold in the last 30 days
    pub top_products: Vec<TopProductStat>,
    pub product_count: u64,
    pub scan: ScanReport,
    pub generated_at: DateTime<Utc>,
}

/// Revenue of approved orders per time window
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RevenueStats {
    pub today: i64,
    pub last_7_days: i64,
    pub last_30_days: i64,
    pub all_time: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderCountStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PaymentMethodStat {
    pub method: String,
    pub count: u64,
    /// Revenue of the approved orders paid with this method
    pub revenue: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TopProductStat {
    pub product_id: Option<String>,
    pub name: String,
    pub quantity: i64,
    pub revenue: i64,
}

/// Which query strategy produced the figures and whether they cover every matching order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScanReport {
    pub strategy: String,
    /// Rows returned by the datastore before any in-memory filtering
    pub rows_scanned: u64,
    /// Rows that matched the location filter and fed the figures
    pub rows_used: u64,
    pub row_budget: u64,
    /// `false` when the row budget was exhausted and older or arbitrary orders were left out
    pub complete: bool,
}
