//! Factory functions for generating mock database models.
//!
//! Provides pure functions for creating storefront models with standard test values.
//! These are in-memory model instances that don't require database interaction, suitable
//! for unit tests and as input to the fixture helpers.

use chrono::Utc;
use entity::sea_orm_active_enums::{
    OrderItemType, OrderStatus, PaymentMethod, PaymentStatus,
};

/// Create a mock customer model with zeroed counters and no tags.
///
/// # Arguments
/// - `customer_id` - Primary key of the customer
/// - `email` - Email stored on the record as given
pub fn mock_customer(customer_id: &str, email: &str) -> entity::customer::Model {
    let now = Utc::now().naive_utc();
    entity::customer::Model {
        id: customer_id.to_string(),
        auth_uid: None,
        email: email.to_string(),
        name: "Test Customer".to_string(),
        phone: None,
        dni: None,
        address: None,
        total_orders: 0,
        total_spent: 0,
        tags: serde_json::json!([]),
        migrated_from: None,
        created_at: now,
        last_order_at: None,
    }
}

/// Create a pending, unpaid gateway order model.
///
/// # Arguments
/// - `order_id` - Primary key of the order
/// - `customer_id` - Current owner of the order
/// - `email` - Snapshot email, stored as given
/// - `total_amount` - Order total
pub fn mock_order(
    order_id: &str,
    customer_id: &str,
    email: &str,
    total_amount: i64,
) -> entity::order::Model {
    let now = Utc::now().naive_utc();
    entity::order::Model {
        id: order_id.to_string(),
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: PaymentMethod::Gateway,
        customer_id: customer_id.to_string(),
        customer_name: "Test Customer".to_string(),
        customer_email: email.to_string(),
        customer_phone: None,
        total_amount,
        currency: "ARS".to_string(),
        location: None,
        metadata: None,
        gateway_preference_id: None,
        gateway_payment_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// Create a single-unit order item model for a generic catalog product.
///
/// The `id` is left as 0; fixture helpers let the database assign it.
pub fn mock_product_item(
    order_id: &str,
    product_id: &str,
    name: &str,
    total: i64,
) -> entity::order_item::Model {
    entity::order_item::Model {
        id: 0,
        order_id: order_id.to_string(),
        item_type: OrderItemType::Product,
        product_id: Some(product_id.to_string()),
        course_id: None,
        name: name.to_string(),
        quantity: 1,
        unit_price: total,
        total,
    }
}

/// Create a single-unit course order item model.
///
/// `course_id` may be `None` to reproduce items sold before course resolution existed.
pub fn mock_course_item(
    order_id: &str,
    product_id: Option<&str>,
    course_id: Option<&str>,
    name: &str,
    total: i64,
) -> entity::order_item::Model {
    entity::order_item::Model {
        id: 0,
        order_id: order_id.to_string(),
        item_type: OrderItemType::Course,
        product_id: product_id.map(str::to_string),
        course_id: course_id.map(str::to_string),
        name: name.to_string(),
        quantity: 1,
        unit_price: total,
        total,
    }
}

/// Create a published course model without any catalog cross-references.
pub fn mock_course(course_id: &str, slug: &str, title: &str) -> entity::course::Model {
    entity::course::Model {
        id: course_id.to_string(),
        slug: slug.to_string(),
        title: title.to_string(),
        external_catalog_id: None,
        related_product_id: None,
        legacy_id: None,
        status: "published".to_string(),
    }
}

/// Create an active generic product model.
pub fn mock_product(product_id: &str, name: &str, price: i64) -> entity::product::Model {
    entity::product::Model {
        id: product_id.to_string(),
        name: name.to_string(),
        price,
        status: "active".to_string(),
        related_course_id: None,
    }
}
