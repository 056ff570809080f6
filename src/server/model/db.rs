//! Database model type aliases.
//!
//! Short names for the SeaORM models of the `entity` crate so service and repository
//! signatures stay readable.

/// Customer record, keyed by the stable id for accounts created or migrated after
/// stable-id identity existed, or by a legacy id otherwise.
pub type CustomerModel = entity::customer::Model;

/// A customer's right to access one course.
///
/// # Fields (from `entity::customer_enrollment::Model`)
/// - `customer_id`, `course_id` - Composite primary key, one enrollment per pair
/// - `product_id` - Product the enrollment was bought through, if any
/// - `order_id` - Order that granted the enrollment
/// - `access_from` / `access_to` - Access window, open ended when `access_to` is `None`
pub type EnrollmentModel = entity::customer_enrollment::Model;

pub type OrderModel = entity::order::Model;

/// One purchased line of an order.
pub type OrderItemModel = entity::order_item::Model;

pub type CourseModel = entity::course::Model;

pub type ProductModel = entity::product::Model;

/// An order item no course could be resolved for, awaiting manual review.
pub type EntitlementReviewModel = entity::entitlement_review::Model;
