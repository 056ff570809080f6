use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::model::db::EntitlementReviewModel;

/// An order item no course could be resolved for
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnresolvedItemDto {
    pub order_id: String,
    pub order_item_id: i32,
    pub item_name: String,
    pub product_id: Option<String>,
}

/// Entitlements produced for a single approved and paid order
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EntitlementGrantDto {
    /// Course ids newly enrolled for the order's owner
    pub granted: Vec<String>,
    /// Course ids the owner was already enrolled in
    pub already_enrolled: Vec<String>,
    pub unresolved: Vec<UnresolvedItemDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RepairRequest {
    /// Report what would change without writing anything
    #[serde(default)]
    pub dry_run: bool,
}

/// Summary of a batch entitlement repair run
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RepairReport {
    pub dry_run: bool,
    pub scanned_orders: u64,
    /// Items whose course id was filled in or corrected
    pub resolved_items: u64,
    /// Items that already carried a valid course id
    pub already_resolved: u64,
    pub enrollments_granted: u64,
    /// Number of items no course matched
    pub unresolved_total: u64,
    /// The first unresolved items found; the full list is kept in the review queue on commit
    pub unresolved: Vec<UnresolvedItemDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EntitlementReviewDto {
    pub order_item_id: i32,
    pub order_id: String,
    pub item_name: String,
    pub product_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EntitlementReviewModel> for EntitlementReviewDto {
    fn from(review: EntitlementReviewModel) -> Self {
        Self {
            order_item_id: review.order_item_id,
            order_id: review.order_id,
            item_name: review.item_name,
            product_id: review.product_id,
            created_at: review.created_at.and_utc(),
        }
    }
}
