//! Order owner resolution.
//!
//! Counters and enrollments are written to the customer owning an order. Guest orders may
//! point at an owner id with no record; those are attached to the customer already holding
//! the order's email, and a record is only created from the order snapshot when no customer
//! has that email, so each email keeps a single active record.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ConnectionTrait, DbErr};

use crate::server::{
    data::{customer::CustomerRepository, order::OrderRepository},
    model::db::{CustomerModel, OrderModel},
    service::identity::link::with_link_entry,
    util::email::normalize_email,
};

/// A customer record built from an order's customer snapshot, with zeroed counters
fn customer_from_order_snapshot(order: &OrderModel, now: NaiveDateTime) -> CustomerModel {
    CustomerModel {
        id: order.customer_id.clone(),
        auth_uid: None,
        email: normalize_email(&order.customer_email),
        name: order.customer_name.clone(),
        phone: order.customer_phone.clone(),
        dni: None,
        address: None,
        total_orders: 0,
        total_spent: 0,
        tags: serde_json::Value::Array(Vec::new()),
        migrated_from: None,
        created_at: now,
        last_order_at: None,
    }
}

/// Id of the customer that owns, or would own, the order without writing anything
///
/// The order's own customer id when that record exists, else the oldest customer under the
/// order's email, else the order's customer id.
pub(crate) async fn find_owner<C: ConnectionTrait>(
    db: &C,
    order: &OrderModel,
) -> Result<String, DbErr> {
    let customer_repo = CustomerRepository::new(db);

    if customer_repo.get_by_id(&order.customer_id).await?.is_some() {
        return Ok(order.customer_id.clone());
    }

    Ok(customer_repo
        .find_by_email(&order.customer_email)
        .await?
        .map(|customer| customer.id)
        .unwrap_or_else(|| order.customer_id.clone()))
}

/// Makes sure the order is owned by an existing customer record
///
/// When the order's customer id has no record but another customer holds the order's
/// email, the order is re-owned by that customer with a `linkHistory` entry. Otherwise a
/// record is created from the order snapshot.
///
/// # Returns
/// - `Ok(String)` - Id of the customer now owning the order
/// - `Err(DbErr)` - Database operation failed
pub(crate) async fn ensure_owner<C: ConnectionTrait>(
    db: &C,
    order: &OrderModel,
    now: NaiveDateTime,
) -> Result<String, DbErr> {
    let owner_id = find_owner(db, order).await?;

    if owner_id != order.customer_id {
        let metadata = with_link_entry(order.metadata.clone(), &order.customer_id, Utc::now());
        OrderRepository::new(db)
            .reassign_customer(&order.id, &owner_id, metadata, now)
            .await?;

        tracing::info!(
            order_id = %order.id,
            previous_customer_id = %order.customer_id,
            customer_id = %owner_id,
            "Attached order to the customer holding its email"
        );

        return Ok(owner_id);
    }

    if CustomerRepository::new(db)
        .insert_if_absent(customer_from_order_snapshot(order, now))
        .await?
    {
        tracing::info!(
            customer_id = %order.customer_id,
            order_id = %order.id,
            "Created customer from order snapshot"
        );
    }

    Ok(owner_id)
}
