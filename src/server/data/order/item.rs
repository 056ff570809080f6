use migration::{CaseStatement, Expr};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::server::{
    data::{BatchWriteError, BATCH_SIZE},
    model::db::OrderItemModel,
};

pub struct OrderItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderItemRepository<'a, C> {
    /// Creates a new instance of [`OrderItemRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_order_ids(&self, order_ids: &[String]) -> Result<Vec<OrderItemModel>, DbErr> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for batch in order_ids.chunks(BATCH_SIZE) {
            let mut batch_items = entity::prelude::OrderItem::find()
                .filter(entity::order_item::Column::OrderId.is_in(batch.iter().cloned()))
                .order_by_asc(entity::order_item::Column::OrderId)
                .order_by_asc(entity::order_item::Column::Id)
                .all(self.db)
                .await?;
            items.append(&mut batch_items);
        }

        Ok(items)
    }

    /// Commits resolved course ids onto order items
    ///
    /// # Arguments
    /// - `items`: Vector of a tuple containing the order item ID and the course ID to set
    ///
    /// # Notes
    /// - Written in chunks of [`BATCH_SIZE`] items, one statement per chunk
    /// - A failing chunk leaves every earlier chunk applied, see [`BatchWriteError`]
    /// - Items that don't exist are silently skipped
    pub async fn set_course_ids(&self, items: &[(i32, String)]) -> Result<(), BatchWriteError> {
        let total_chunks = items.len().div_ceil(BATCH_SIZE);

        for (index, batch) in items.chunks(BATCH_SIZE).enumerate() {
            let mut case_stmt = CaseStatement::new();
            let item_ids: Vec<i32> = batch.iter().map(|(id, _)| *id).collect();

            for (item_id, course_id) in batch {
                case_stmt = case_stmt.case(
                    entity::order_item::Column::Id.eq(*item_id),
                    Expr::value(course_id.clone()),
                );
            }

            entity::prelude::OrderItem::update_many()
                .col_expr(entity::order_item::Column::CourseId, case_stmt.into())
                .filter(entity::order_item::Column::Id.is_in(item_ids))
                .exec(self.db)
                .await
                .map_err(|source| BatchWriteError {
                    applied_chunks: index,
                    total_chunks,
                    source,
                })?;
        }

        Ok(())
    }
}
