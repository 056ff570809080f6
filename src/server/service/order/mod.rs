//! Order state machine.
//!
//! Orders only change status through the named actions in [`action::OrderAction`]. A
//! transition is written conditionally on the state it was computed from, then triggers
//! its side effects: customer counters for a first payment and course entitlements
//! whenever the order ends up approved and paid.

pub mod action;
pub(crate) mod owner;

#[cfg(test)]
mod tests;

use chrono::{NaiveDateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{entitlement::EntitlementGrantDto, order::CreateOrderRequest},
    server::{
        data::{
            customer::CustomerRepository,
            order::{OrderRepository, OrderState},
        },
        error::{order::OrderError, Error},
        model::db::{OrderItemModel, OrderModel},
        service::{
            entitlement::EntitlementService,
            order::{action::OrderAction, owner::ensure_owner},
        },
        util::email::normalize_email,
    },
};

/// Result of applying an action to an order
#[derive(Clone, Debug)]
pub struct TransitionOutcome {
    pub action: OrderAction,
    pub order: OrderModel,
    pub items: Vec<OrderItemModel>,
    pub previous: OrderState,
    /// Whether the owner's counters were incremented
    pub stats_applied: bool,
    /// Present when the order ended up approved and paid
    pub entitlements: Option<EntitlementGrantDto>,
}

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderService<'a> {
    /// Creates a new instance of [`OrderService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and persists an order submitted by checkout
    ///
    /// Item totals are computed from quantity and unit price and the order total is their
    /// sum; the snapshot email is normalized. The order and its items are written in one
    /// transaction.
    ///
    /// # Returns
    /// - `Ok((OrderModel, Vec<OrderItemModel>))` - The persisted order and items
    /// - `Err(Error::OrderError)` - The order violates a checkout invariant
    /// - `Err(Error::DbErr)` - Database operation failed, e.g. a duplicate order id
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), Error> {
        let (order, items) = build_order(request, Utc::now().naive_utc())?;

        let txn = self.db.begin().await?;
        let (order, items) = OrderRepository::new(&txn).create(order, items).await?;
        txn.commit().await?;

        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            total_amount = order.total_amount,
            "Created order"
        );

        Ok((order, items))
    }

    /// Applies a state machine action to an order
    ///
    /// # Side effects
    /// - `mark_as_paid` on an order that wasn't paid yet atomically adds one order and the
    ///   order total to the owner's counters
    /// - Any transition ending in approved and paid grants the purchased courses
    ///
    /// Side effects already committed are not rolled back if a later one fails.
    ///
    /// # Returns
    /// - `Ok(TransitionOutcome)` - The updated order and the side effects applied
    /// - `Err(Error::OrderError)` - Unknown order or the order changed concurrently
    /// - `Err(Error::DbErr)` / `Err(Error::PartialBatch)` - Persistence failure
    pub async fn apply_action(
        &self,
        order_id: &str,
        action: OrderAction,
    ) -> Result<TransitionOutcome, Error> {
        let order_repo = OrderRepository::new(self.db);

        let (order, items) = order_repo
            .get_with_items(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        let previous = OrderState::of(&order);
        let target = action.apply(previous);
        let now = Utc::now().naive_utc();

        if order_repo
            .update_status(order_id, previous, target, now)
            .await?
            == 0
        {
            return Err(OrderError::ConcurrentModification {
                order_id: order_id.to_string(),
                action: action.name().to_string(),
            }
            .into());
        }

        let mut order = OrderModel {
            status: target.status,
            payment_status: target.payment_status,
            updated_at: now,
            ..order
        };

        tracing::info!(
            order_id,
            action = action.name(),
            from_status = ?previous.status,
            from_payment_status = ?previous.payment_status,
            to_status = ?target.status,
            to_payment_status = ?target.payment_status,
            "Applied order transition"
        );

        let stats_applied = action.records_sale(previous);
        let settled = target.is_settled();

        if stats_applied || settled {
            let owner_id = ensure_owner(self.db, &order, now).await?;
            if owner_id != order.customer_id {
                order = order_repo
                    .get_by_id(order_id)
                    .await?
                    .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
            }
        }

        if stats_applied {
            CustomerRepository::new(self.db)
                .increment_stats(&order.customer_id, order.total_amount, now)
                .await?;
        }

        let entitlements = if settled {
            Some(
                EntitlementService::new(self.db)
                    .grant_for_order(&order, &items)
                    .await?,
            )
        } else {
            None
        };

        Ok(TransitionOutcome {
            action,
            order,
            items,
            previous,
            stats_applied,
            entitlements,
        })
    }
}

fn build_order(
    request: CreateOrderRequest,
    now: NaiveDateTime,
) -> Result<(OrderModel, Vec<OrderItemModel>), OrderError> {
    let invalid = |reason: String| OrderError::InvalidOrder {
        order_id: request.id.clone(),
        reason,
    };

    if request.id.trim().is_empty() {
        return Err(invalid("order id is empty".to_string()));
    }
    if request.customer_id.trim().is_empty() {
        return Err(invalid("customer id is empty".to_string()));
    }
    let email = normalize_email(&request.customer_email);
    if !email.contains('@') {
        return Err(invalid(format!("invalid customer email {:?}", request.customer_email)));
    }
    if request.items.is_empty() {
        return Err(invalid("order has no items".to_string()));
    }

    let mut items = Vec::with_capacity(request.items.len());
    let mut total_amount: i64 = 0;

    for item in &request.items {
        if item.quantity <= 0 {
            return Err(invalid(format!("item {:?} has quantity {}", item.name, item.quantity)));
        }
        if item.unit_price < 0 {
            return Err(invalid(format!("item {:?} has a negative price", item.name)));
        }

        let total = item
            .unit_price
            .checked_mul(i64::from(item.quantity))
            .ok_or_else(|| invalid(format!("item {:?} total overflows", item.name)))?;
        total_amount = total_amount
            .checked_add(total)
            .ok_or_else(|| invalid("order total overflows".to_string()))?;

        items.push(OrderItemModel {
            id: 0,
            order_id: request.id.clone(),
            item_type: item.item_type,
            product_id: item.product_id.clone(),
            course_id: item.course_id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total,
        });
    }

    let order = OrderModel {
        id: request.id.clone(),
        status: entity::sea_orm_active_enums::OrderStatus::Pending,
        payment_status: entity::sea_orm_active_enums::PaymentStatus::Pending,
        payment_method: request.payment_method,
        customer_id: request.customer_id.clone(),
        customer_name: request.customer_name.trim().to_string(),
        customer_email: email,
        customer_phone: request.customer_phone.clone(),
        total_amount,
        currency: request.currency.clone(),
        location: request.location.clone(),
        metadata: request.metadata.clone(),
        gateway_preference_id: request.gateway_preference_id.clone(),
        gateway_payment_id: None,
        created_at: now,
        updated_at: now,
    };

    Ok((order, items))
}
