//! SeaORM entities for the storefront datastore.

pub mod prelude;

pub mod course;
pub mod customer;
pub mod customer_enrollment;
pub mod entitlement_review;
pub mod order;
pub mod order_item;
pub mod product;
pub mod sea_orm_active_enums;
