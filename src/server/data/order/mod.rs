//! Orders and their line items.

pub mod item;

#[cfg(test)]
mod tests;

use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{OrderStatus, PaymentStatus};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::model::db::{OrderItemModel, OrderModel};

/// The pair of fields the order state machine drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderState {
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
}

impl OrderState {
    pub fn of(order: &OrderModel) -> Self {
        Self {
            status: order.status,
            payment_status: order.payment_status,
        }
    }

    /// Whether the order entitles its owner to the purchased courses
    pub fn is_settled(&self) -> bool {
        self.status == OrderStatus::Approved && self.payment_status == PaymentStatus::Paid
    }
}

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    /// Creates a new instance of [`OrderRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an order together with its items
    ///
    /// Item ids are assigned by the database and every item is attached to the order
    /// regardless of the `order_id` it carries. Pass a transaction as the connection for the
    /// order and items to be written atomically.
    pub async fn create(
        &self,
        order: OrderModel,
        items: Vec<OrderItemModel>,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), DbErr> {
        let order = entity::prelude::Order::insert(order.into_active_model())
            .exec_with_returning(self.db)
            .await?;

        if !items.is_empty() {
            let items = items.into_iter().map(|item| {
                let mut item = item.into_active_model();
                item.id = ActiveValue::NotSet;
                item.order_id = ActiveValue::Set(order.id.clone());
                item
            });

            entity::prelude::OrderItem::insert_many(items)
                .exec_without_returning(self.db)
                .await?;
        }

        let items = entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.eq(order.id.as_str()))
            .order_by_asc(entity::order_item::Column::Id)
            .all(self.db)
            .await?;

        Ok((order, items))
    }

    pub async fn get_by_id(&self, order_id: &str) -> Result<Option<OrderModel>, DbErr> {
        entity::prelude::Order::find_by_id(order_id.to_string())
            .one(self.db)
            .await
    }

    pub async fn get_with_items(
        &self,
        order_id: &str,
    ) -> Result<Option<(OrderModel, Vec<OrderItemModel>)>, DbErr> {
        let Some(order) = self.get_by_id(order_id).await? else {
            return Ok(None);
        };

        let items = entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.eq(order_id))
            .order_by_asc(entity::order_item::Column::Id)
            .all(self.db)
            .await?;

        Ok(Some((order, items)))
    }

    /// Gets every order whose snapshot email exactly equals one of `emails`
    pub async fn find_by_customer_emails(&self, emails: &[String]) -> Result<Vec<OrderModel>, DbErr> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Order::find()
            .filter(entity::order::Column::CustomerEmail.is_in(emails.iter().cloned()))
            .order_by_asc(entity::order::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Moves an order to a new owner and replaces its metadata
    ///
    /// Conditional on the order not already belonging to `customer_id`; returns the number of
    /// rows written, 0 when the order was already owned or doesn't exist.
    pub async fn reassign_customer(
        &self,
        order_id: &str,
        customer_id: &str,
        metadata: serde_json::Value,
        updated_at: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Order::update_many()
            .set(entity::order::ActiveModel {
                customer_id: ActiveValue::Set(customer_id.to_string()),
                metadata: ActiveValue::Set(Some(metadata)),
                updated_at: ActiveValue::Set(updated_at),
                ..Default::default()
            })
            .filter(entity::order::Column::Id.eq(order_id))
            .filter(entity::order::Column::CustomerId.ne(customer_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Writes a new status pair, conditional on the order still being in `expected`
    ///
    /// Returns the number of rows written; 0 means the order changed since it was read.
    pub async fn update_status(
        &self,
        order_id: &str,
        expected: OrderState,
        target: OrderState,
        updated_at: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Order::update_many()
            .set(entity::order::ActiveModel {
                status: ActiveValue::Set(target.status),
                payment_status: ActiveValue::Set(target.payment_status),
                updated_at: ActiveValue::Set(updated_at),
                ..Default::default()
            })
            .filter(entity::order::Column::Id.eq(order_id))
            .filter(entity::order::Column::Status.eq(expected.status))
            .filter(entity::order::Column::PaymentStatus.eq(expected.payment_status))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Reads at most `limit` orders for the dashboard
    ///
    /// # Arguments
    /// - `location`: Only return orders tagged with this location when provided
    /// - `newest_first`: Sort by `created_at` descending; unsorted otherwise
    /// - `limit`: Row budget of the scan
    pub async fn scan(
        &self,
        location: Option<&str>,
        newest_first: bool,
        limit: u64,
    ) -> Result<Vec<OrderModel>, DbErr> {
        let mut query = entity::prelude::Order::find();

        if let Some(location) = location {
            query = query.filter(entity::order::Column::Location.eq(location));
        }
        if newest_first {
            query = query.order_by_desc(entity::order::Column::CreatedAt);
        }

        query.limit(limit).all(self.db).await
    }

    /// Gets the next page of approved and paid orders ordered by id
    ///
    /// # Arguments
    /// - `after_id`: Id of the last order of the previous page, `None` for the first page
    /// - `limit`: Page size
    pub async fn find_paid_orders_page(
        &self,
        after_id: Option<&str>,
        limit: u64,
    ) -> Result<Vec<OrderModel>, DbErr> {
        let mut query = entity::prelude::Order::find()
            .filter(entity::order::Column::Status.eq(OrderStatus::Approved))
            .filter(entity::order::Column::PaymentStatus.eq(PaymentStatus::Paid));

        if let Some(after_id) = after_id {
            query = query.filter(entity::order::Column::Id.gt(after_id));
        }

        query
            .order_by_asc(entity::order::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }
}
