pub use super::course::Entity as Course;
pub use super::customer::Entity as Customer;
pub use super::customer_enrollment::Entity as CustomerEnrollment;
pub use super::entitlement_review::Entity as EntitlementReview;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::product::Entity as Product;
