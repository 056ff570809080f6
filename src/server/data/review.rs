//! Manual review queue for order items no course could be resolved for.

use chrono::NaiveDateTime;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::db::EntitlementReviewModel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewReview {
    pub order_item_id: i32,
    pub order_id: String,
    pub item_name: String,
    pub product_id: Option<String>,
}

pub struct EntitlementReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EntitlementReviewRepository<'a, C> {
    /// Creates a new instance of [`EntitlementReviewRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Queues order items for manual review
    ///
    /// Items already queued keep their original entry. Returns the number of new entries.
    pub async fn record_many(
        &self,
        reviews: Vec<NewReview>,
        created_at: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        if reviews.is_empty() {
            return Ok(0);
        }

        let reviews = reviews
            .into_iter()
            .map(|review| entity::entitlement_review::ActiveModel {
                order_item_id: ActiveValue::Set(review.order_item_id),
                order_id: ActiveValue::Set(review.order_id),
                item_name: ActiveValue::Set(review.item_name),
                product_id: ActiveValue::Set(review.product_id),
                created_at: ActiveValue::Set(created_at),
            });

        entity::prelude::EntitlementReview::insert_many(reviews)
            .on_conflict(
                OnConflict::column(entity::entitlement_review::Column::OrderItemId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await
    }

    /// Gets the review queue, oldest entries first
    pub async fn list(&self) -> Result<Vec<EntitlementReviewModel>, DbErr> {
        entity::prelude::EntitlementReview::find()
            .order_by_asc(entity::entitlement_review::Column::CreatedAt)
            .order_by_asc(entity::entitlement_review::Column::OrderItemId)
            .all(self.db)
            .await
    }

    /// Removes queued items that have since been resolved
    pub async fn resolve_many(&self, order_item_ids: &[i32]) -> Result<u64, DbErr> {
        if order_item_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::EntitlementReview::delete_many()
            .filter(
                entity::entitlement_review::Column::OrderItemId
                    .is_in(order_item_ids.iter().copied()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
