//! Test fixture modules for database record creation.
//!
//! - `customer` - Customer records and enrollments
//! - `order` - Orders with their line items
//! - `catalog` - Courses and generic products

pub mod catalog;
pub mod customer;
pub mod order;
