//! Batch entitlement repair.
//!
//! Items sold before course resolution existed carry no course id, and some of their
//! owners were never enrolled. Repair pages through every approved and paid order,
//! re-resolves its items and, unless running dry, commits course ids and enrollments.
//! Every write is idempotent so the job can be re-run or resumed after a failure.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{NaiveDateTime, Utc};
use sea_orm::ConnectionTrait;

use crate::{
    model::entitlement::{RepairReport, UnresolvedItemDto},
    server::{
        data::{
            catalog::CatalogRepository,
            customer::enrollment::{EnrollmentRepository, NewEnrollment},
            order::{item::OrderItemRepository, OrderRepository},
            review::EntitlementReviewRepository,
            BATCH_SIZE,
        },
        error::Error,
        model::db::{CourseModel, OrderItemModel, OrderModel},
        service::{
            entitlement::{
                matcher::CourseCatalog, resolve_item, review_entry, unresolved_item,
                EntitlementService, ItemResolution,
            },
            order::owner::{ensure_owner, find_owner},
        },
    },
};

const PAGE_SIZE: u64 = BATCH_SIZE as u64;

/// Unresolved items listed in a repair report
pub const REPORTED_UNRESOLVED_LIMIT: usize = 100;

/// Writes planned for one page of orders
#[derive(Default)]
struct PagePlan {
    course_updates: Vec<(i32, String)>,
    resolved_item_ids: Vec<i32>,
    grants: Vec<NewEnrollment>,
    unresolved: Vec<UnresolvedItemDto>,
}

impl<'a, C: ConnectionTrait> EntitlementService<'a, C> {
    /// Re-resolves every approved and paid order and grants missing enrollments
    ///
    /// # Arguments
    /// - `dry_run`: Only report what would change, without writing anything
    ///
    /// # Returns
    /// - `Ok(RepairReport)` - Counts of scanned orders, fixed items, granted enrollments
    ///   (would-be grants on a dry run) and unresolved items, listing at most
    ///   [`REPORTED_UNRESOLVED_LIMIT`] of the latter
    /// - `Err(Error::PartialBatch)` - Course id writes failed part-way; re-run to finish
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn repair_entitlements(&self, dry_run: bool) -> Result<RepairReport, Error> {
        self.repair_entitlements_reporting(dry_run, REPORTED_UNRESOLVED_LIMIT)
            .await
    }

    pub(crate) async fn repair_entitlements_reporting(
        &self,
        dry_run: bool,
        report_limit: usize,
    ) -> Result<RepairReport, Error> {
        let order_repo = OrderRepository::new(self.db);
        let item_repo = OrderItemRepository::new(self.db);
        let catalog_repo = CatalogRepository::new(self.db);

        let courses = catalog_repo.get_all_courses().await?;
        let mut report = RepairReport {
            dry_run,
            ..Default::default()
        };
        let mut planned_pairs: HashSet<(String, String)> = HashSet::new();
        let mut after_id: Option<String> = None;

        loop {
            let orders = order_repo
                .find_paid_orders_page(after_id.as_deref(), PAGE_SIZE)
                .await?;
            let Some(last) = orders.last() else {
                break;
            };
            after_id = Some(last.id.clone());
            report.scanned_orders += orders.len() as u64;

            let order_ids: Vec<String> = orders.iter().map(|order| order.id.clone()).collect();
            let items = item_repo.get_by_order_ids(&order_ids).await?;
            let catalog = self.page_catalog(&courses, &items).await?;

            let mut plan = plan_page(&orders, &items, &catalog, &mut report);
            self.assign_owners(&orders, &mut plan, dry_run).await?;

            report.enrollments_granted += if dry_run {
                self.count_new_grants(&plan.grants, &mut planned_pairs).await?
            } else {
                self.apply_page(&plan).await?
            };
            report.unresolved_total += plan.unresolved.len() as u64;
            let room = report_limit.saturating_sub(report.unresolved.len());
            report
                .unresolved
                .extend(plan.unresolved.iter().take(room).cloned());

            if (orders.len() as u64) < PAGE_SIZE {
                break;
            }
        }

        tracing::info!(
            dry_run,
            scanned_orders = report.scanned_orders,
            resolved_items = report.resolved_items,
            already_resolved = report.already_resolved,
            enrollments_granted = report.enrollments_granted,
            unresolved = report.unresolved_total,
            "Entitlement repair finished"
        );

        Ok(report)
    }

    async fn page_catalog(
        &self,
        courses: &[CourseModel],
        items: &[OrderItemModel],
    ) -> Result<CourseCatalog, Error> {
        let product_ids: Vec<String> = items
            .iter()
            .filter_map(|item| item.product_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let products = CatalogRepository::new(self.db)
            .get_products_by_ids(&product_ids)
            .await?;

        Ok(CourseCatalog::new(courses.to_vec(), products))
    }

    /// Counts grants that don't exist yet and weren't already counted earlier in the run
    async fn count_new_grants(
        &self,
        grants: &[NewEnrollment],
        planned_pairs: &mut HashSet<(String, String)>,
    ) -> Result<u64, Error> {
        let customer_ids: Vec<String> = grants
            .iter()
            .map(|grant| grant.customer_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let existing: HashSet<(String, String)> = EnrollmentRepository::new(self.db)
            .get_by_customer_ids(&customer_ids)
            .await?
            .into_iter()
            .map(|enrollment| (enrollment.customer_id, enrollment.course_id))
            .collect();

        let mut count = 0;
        for grant in grants {
            let pair = (grant.customer_id.clone(), grant.course_id.clone());
            if !existing.contains(&pair) && planned_pairs.insert(pair) {
                count += 1;
            }
        }

        Ok(count)
    }

    /// Points each planned grant at the customer owning its order
    ///
    /// Commit runs attach guest orders to the customer holding their email, or create the
    /// owner from the order snapshot; dry runs only look the owner up.
    async fn assign_owners(
        &self,
        orders: &[OrderModel],
        plan: &mut PagePlan,
        dry_run: bool,
    ) -> Result<(), Error> {
        let granted_orders: HashSet<&str> = plan
            .grants
            .iter()
            .map(|grant| grant.order_id.as_str())
            .collect();
        let now = Utc::now().naive_utc();

        let mut owners: HashMap<String, String> = HashMap::new();
        for order in orders {
            if !granted_orders.contains(order.id.as_str()) {
                continue;
            }

            let owner_id = if dry_run {
                find_owner(self.db, order).await?
            } else {
                ensure_owner(self.db, order, now).await?
            };
            owners.insert(order.id.clone(), owner_id);
        }

        for grant in &mut plan.grants {
            if let Some(owner_id) = owners.get(&grant.order_id) {
                grant.customer_id = owner_id.clone();
            }
        }

        Ok(())
    }

    /// Commits a page plan, returning the number of enrollments written
    async fn apply_page(&self, plan: &PagePlan) -> Result<u64, Error> {
        let now = Utc::now().naive_utc();

        OrderItemRepository::new(self.db)
            .set_course_ids(&plan.course_updates)
            .await
            .map_err(|e| Error::partial_batch("course id repair", e))?;

        let enrollment_repo = EnrollmentRepository::new(self.db);
        let mut granted = 0;
        for grant in &plan.grants {
            if enrollment_repo.grant(grant.clone()).await? {
                granted += 1;
            }
        }

        let review_repo = EntitlementReviewRepository::new(self.db);
        review_repo.resolve_many(&plan.resolved_item_ids).await?;
        review_repo
            .record_many(plan.unresolved.iter().map(review_entry).collect(), now)
            .await?;

        Ok(granted)
    }
}

/// Resolves every item of a page and tallies the resolution counters
fn plan_page(
    orders: &[OrderModel],
    items: &[OrderItemModel],
    catalog: &CourseCatalog,
    report: &mut RepairReport,
) -> PagePlan {
    let orders_by_id: HashMap<&str, &OrderModel> = orders
        .iter()
        .map(|order| (order.id.as_str(), order))
        .collect();
    let mut plan = PagePlan::default();

    for item in items {
        let Some(order) = orders_by_id.get(item.order_id.as_str()) else {
            continue;
        };

        match resolve_item(item, catalog) {
            ItemResolution::Course {
                resolution,
                changed,
            } => {
                if changed {
                    report.resolved_items += 1;
                    plan.course_updates
                        .push((item.id, resolution.course_id.clone()));
                } else {
                    report.already_resolved += 1;
                }

                plan.resolved_item_ids.push(item.id);
                plan.grants.push(NewEnrollment {
                    customer_id: order.customer_id.clone(),
                    course_id: resolution.course_id,
                    product_id: item.product_id.clone(),
                    order_id: order.id.clone(),
                    access_from: settled_at(order),
                });
            }
            ItemResolution::Unresolved => plan.unresolved.push(unresolved_item(item)),
            ItemResolution::NotACourse => {}
        }
    }

    plan
}

/// Best known time the order became paid
fn settled_at(order: &OrderModel) -> NaiveDateTime {
    order.updated_at
}
