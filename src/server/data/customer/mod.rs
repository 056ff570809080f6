//! Customer records and their course enrollments.

pub mod enrollment;

#[cfg(test)]
mod tests;

use chrono::NaiveDateTime;
use migration::{Expr, OnConflict};
use sea_orm::{
    sea_query::ExprTrait, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::{model::db::CustomerModel, util::email::lookup_variants};

pub struct CustomerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CustomerRepository<'a, C> {
    /// Creates a new instance of [`CustomerRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, customer_id: &str) -> Result<Option<CustomerModel>, DbErr> {
        entity::prelude::Customer::find_by_id(customer_id.to_string())
            .one(self.db)
            .await
    }

    /// Finds the oldest customer stored under any lookup variant of `email`
    ///
    /// Probes the normalized email and its capitalized variant in a single query since
    /// legacy records were persisted without normalization.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<CustomerModel>, DbErr> {
        entity::prelude::Customer::find()
            .filter(entity::customer::Column::Email.is_in(lookup_variants(email)))
            .order_by_asc(entity::customer::Column::CreatedAt)
            .order_by_asc(entity::customer::Column::Id)
            .one(self.db)
            .await
    }

    /// Inserts the customer unless a record with the same id already exists
    ///
    /// Returns `true` when the record was written, `false` when another writer got there first.
    pub async fn insert_if_absent(&self, customer: CustomerModel) -> Result<bool, DbErr> {
        let rows = entity::prelude::Customer::insert(customer.into_active_model())
            .on_conflict(
                OnConflict::column(entity::customer::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(rows > 0)
    }

    /// Atomically records a paid order on the customer's counters
    ///
    /// Returns the number of rows affected, 0 when the customer doesn't exist.
    pub async fn increment_stats(
        &self,
        customer_id: &str,
        amount: i64,
        order_at: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Customer::update_many()
            .col_expr(
                entity::customer::Column::TotalOrders,
                Expr::col(entity::customer::Column::TotalOrders).add(1),
            )
            .col_expr(
                entity::customer::Column::TotalSpent,
                Expr::col(entity::customer::Column::TotalSpent).add(amount),
            )
            .col_expr(
                entity::customer::Column::LastOrderAt,
                Expr::value(Some(order_at)),
            )
            .filter(entity::customer::Column::Id.eq(customer_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a customer
    ///
    /// Returns OK regardless of the customer existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, customer_id: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::Customer::delete_by_id(customer_id.to_string())
            .exec(self.db)
            .await
    }
}
