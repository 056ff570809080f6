pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_customer_table;
mod m20250301_000002_create_customer_enrollment_table;
mod m20250301_000003_create_orders_table;
mod m20250301_000004_create_order_item_table;
mod m20250301_000005_create_course_table;
mod m20250301_000006_create_product_table;
mod m20250301_000007_create_entitlement_review_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_customer_table::Migration),
            Box::new(m20250301_000002_create_customer_enrollment_table::Migration),
            Box::new(m20250301_000003_create_orders_table::Migration),
            Box::new(m20250301_000004_create_order_item_table::Migration),
            Box::new(m20250301_000005_create_course_table::Migration),
            Box::new(m20250301_000006_create_product_table::Migration),
            Box::new(m20250301_000007_create_entitlement_review_table::Migration),
        ]
    }
}
