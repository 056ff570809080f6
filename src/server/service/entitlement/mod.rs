//! Course entitlements.
//!
//! Decides which courses an order grants and writes the resulting enrollments. The online
//! path runs whenever an order becomes approved and paid; the batch path in [`repair`]
//! re-resolves every settled order to backfill items sold before resolution existed.

pub mod matcher;
pub mod overrides;
pub mod repair;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use chrono::Utc;
use entity::sea_orm_active_enums::OrderItemType;
use sea_orm::ConnectionTrait;

use crate::{
    model::entitlement::{EntitlementGrantDto, UnresolvedItemDto},
    server::{
        data::{
            catalog::CatalogRepository,
            customer::enrollment::{EnrollmentRepository, NewEnrollment},
            order::item::OrderItemRepository,
            review::{EntitlementReviewRepository, NewReview},
        },
        error::Error,
        model::db::{OrderItemModel, OrderModel},
        service::entitlement::matcher::{resolve_course_for, CourseCatalog, LineItem, Resolution},
    },
};

/// How a single order item resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemResolution {
    /// Resolved to a course; `changed` is true when the item's stored course id differs
    Course {
        resolution: Resolution,
        changed: bool,
    },
    /// A course item nothing matched
    Unresolved,
    /// A generic product that doesn't grant any course
    NotACourse,
}

/// Resolves one order item
///
/// Course items that resolve to nothing are [`ItemResolution::Unresolved`]. Product items
/// are only entitlements when they resolve to a course.
pub fn resolve_item(item: &OrderItemModel, catalog: &CourseCatalog) -> ItemResolution {
    match resolve_course_for(LineItem::from(item), catalog) {
        Some(resolution) => {
            let changed = item.course_id.as_deref() != Some(resolution.course_id.as_str());
            ItemResolution::Course {
                resolution,
                changed,
            }
        }
        None if item.item_type == OrderItemType::Course => ItemResolution::Unresolved,
        None => ItemResolution::NotACourse,
    }
}

pub(crate) fn unresolved_item(item: &OrderItemModel) -> UnresolvedItemDto {
    UnresolvedItemDto {
        order_id: item.order_id.clone(),
        order_item_id: item.id,
        item_name: item.name.clone(),
        product_id: item.product_id.clone(),
    }
}

pub(crate) fn review_entry(item: &UnresolvedItemDto) -> NewReview {
    NewReview {
        order_item_id: item.order_item_id,
        order_id: item.order_id.clone(),
        item_name: item.item_name.clone(),
        product_id: item.product_id.clone(),
    }
}

pub struct EntitlementService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EntitlementService<'a, C> {
    /// Creates a new instance of [`EntitlementService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Loads every course plus the products referenced by `items`
    pub async fn load_catalog(&self, items: &[OrderItemModel]) -> Result<CourseCatalog, Error> {
        let catalog_repo = CatalogRepository::new(self.db);

        let product_ids: Vec<String> = items
            .iter()
            .filter_map(|item| item.product_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let courses = catalog_repo.get_all_courses().await?;
        let products = catalog_repo.get_products_by_ids(&product_ids).await?;

        Ok(CourseCatalog::new(courses, products))
    }

    /// Grants the courses bought in an approved and paid order to its owner
    ///
    /// Resolved course ids are committed back onto the items, enrollments the owner already
    /// has are skipped and course items nothing matched are queued for manual review.
    ///
    /// # Notes
    /// - The order's owner must exist as a customer due to the enrollment foreign key
    pub async fn grant_for_order(
        &self,
        order: &OrderModel,
        items: &[OrderItemModel],
    ) -> Result<EntitlementGrantDto, Error> {
        let catalog = self.load_catalog(items).await?;
        let enrollment_repo = EnrollmentRepository::new(self.db);
        let now = Utc::now().naive_utc();

        let mut outcome = EntitlementGrantDto::default();
        let mut course_updates = Vec::new();
        let mut resolved_item_ids = Vec::new();

        for item in items {
            let resolution = match resolve_item(item, &catalog) {
                ItemResolution::Course {
                    resolution,
                    changed,
                } => {
                    if changed {
                        course_updates.push((item.id, resolution.course_id.clone()));
                    }
                    resolved_item_ids.push(item.id);
                    resolution
                }
                ItemResolution::Unresolved => {
                    tracing::warn!(
                        order_id = %order.id,
                        order_item_id = item.id,
                        item_name = %item.name,
                        "No course matches order item, queued for review"
                    );
                    outcome.unresolved.push(unresolved_item(item));
                    continue;
                }
                ItemResolution::NotACourse => continue,
            };

            let granted = enrollment_repo
                .grant(NewEnrollment {
                    customer_id: order.customer_id.clone(),
                    course_id: resolution.course_id.clone(),
                    product_id: item.product_id.clone(),
                    order_id: order.id.clone(),
                    access_from: now,
                })
                .await?;

            if granted {
                outcome.granted.push(resolution.course_id);
            } else {
                outcome.already_enrolled.push(resolution.course_id);
            }
        }

        OrderItemRepository::new(self.db)
            .set_course_ids(&course_updates)
            .await
            .map_err(|e| Error::partial_batch(&format!("course id update for order {}", order.id), e))?;

        let review_repo = EntitlementReviewRepository::new(self.db);
        review_repo.resolve_many(&resolved_item_ids).await?;
        review_repo
            .record_many(outcome.unresolved.iter().map(review_entry).collect(), now)
            .await?;

        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            granted = outcome.granted.len(),
            already_enrolled = outcome.already_enrolled.len(),
            unresolved = outcome.unresolved.len(),
            "Granted course entitlements for order"
        );

        Ok(outcome)
    }
}
