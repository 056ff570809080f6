use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{OrderItemType, OrderStatus, PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};

use crate::{
    model::entitlement::EntitlementGrantDto,
    server::model::db::{OrderItemModel, OrderModel},
};

/// Named state machine action requested by the admin UI or the payment webhook
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderActionRequest {
    /// One of `mark_as_paid`, `mark_as_cancelled`, `mark_as_refunded`, `update_status`
    pub action: String,
    /// Target status, only read by `update_status`
    #[schema(value_type = Option<String>)]
    pub status: Option<OrderStatus>,
    /// Target payment status, only read by `update_status`
    #[schema(value_type = Option<String>)]
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderDto {
    pub id: String,
    #[schema(value_type = String)]
    pub status: OrderStatus,
    #[schema(value_type = String)]
    pub payment_status: PaymentStatus,
    #[schema(value_type = String)]
    pub payment_method: PaymentMethod,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub items: Vec<OrderItemDto>,
    pub total_amount: i64,
    pub currency: String,
    pub location: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderItemDto {
    pub id: i32,
    #[schema(value_type = String)]
    pub item_type: OrderItemType,
    pub product_id: Option<String>,
    pub course_id: Option<String>,
    pub name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total: i64,
}

/// Result of applying a state machine action to an order
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderTransitionDto {
    pub action: String,
    pub order: OrderDto,
    #[schema(value_type = String)]
    pub previous_status: OrderStatus,
    #[schema(value_type = String)]
    pub previous_payment_status: PaymentStatus,
    /// Whether the owner's order counters were incremented
    pub stats_applied: bool,
    /// Present when the transition left the order approved and paid
    pub entitlements: Option<EntitlementGrantDto>,
}

impl OrderDto {
    pub fn from_models(order: OrderModel, items: Vec<OrderItemModel>) -> Self {
        Self {
            id: order.id,
            status: order.status,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            customer_id: order.customer_id,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            items: items.into_iter().map(OrderItemDto::from).collect(),
            total_amount: order.total_amount,
            currency: order.currency,
            location: order.location,
            metadata: order.metadata,
            created_at: order.created_at.and_utc(),
            updated_at: order.updated_at.and_utc(),
        }
    }
}

impl From<OrderItemModel> for OrderItemDto {
    fn from(item: OrderItemModel) -> Self {
        Self {
            id: item.id,
            item_type: item.item_type,
            product_id: item.product_id,
            course_id: item.course_id,
            name: item.name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total: item.total,
        }
    }
}

/// Order submitted by checkout
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateOrderRequest {
    /// Order id, shared with the payment gateway as external reference
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    #[schema(value_type = String)]
    pub payment_method: PaymentMethod,
    pub currency: String,
    pub location: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub gateway_preference_id: Option<String>,
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateOrderItemRequest {
    #[schema(value_type = String)]
    pub item_type: OrderItemType,
    pub product_id: Option<String>,
    pub course_id: Option<String>,
    pub name: String,
    pub quantity: i32,
    pub unit_price: i64,
}
