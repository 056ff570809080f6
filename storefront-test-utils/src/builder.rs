//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and
/// fixtures. Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_store_tables: bool,

    // Database fixtures to insert
    customers: Vec<(String, String)>, // (customer_id, email)
    courses: Vec<entity::course::Model>,
    products: Vec<entity::product::Model>,
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_store_tables: false,
            customers: Vec::new(),
            courses: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Add every storefront table to the test database.
    ///
    /// Creates Customer, CustomerEnrollment, Order, OrderItem, Course, Product and
    /// EntitlementReview in foreign-key order.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_store_tables(mut self) -> Self {
        self.include_store_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```no_run
    /// use storefront_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), storefront_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Course)
    ///     .with_table(Product)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a customer with zeroed counters during `build()`.
    ///
    /// # Arguments
    /// - `customer_id` - Primary key of the customer record
    /// - `email` - Email stored on the record as given (not normalized)
    pub fn with_customer(mut self, customer_id: impl Into<String>, email: impl Into<String>) -> Self {
        self.customers.push((customer_id.into(), email.into()));
        self
    }

    /// Insert a course into the catalog during `build()`.
    pub fn with_course(mut self, course: entity::course::Model) -> Self {
        self.courses.push(course);
        self
    }

    /// Insert a generic product into the catalog during `build()`.
    pub fn with_product(mut self, product: entity::product::Model) -> Self {
        self.products.push(product);
        self
    }

    /// Build the test setup by creating all configured tables and fixtures.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (store tables if specified, then custom tables)
    /// 2. Inserts database fixtures (customers, courses, products)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_store_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Customer),
                schema.create_table_from_entity(entity::prelude::CustomerEnrollment),
                schema.create_table_from_entity(entity::prelude::Order),
                schema.create_table_from_entity(entity::prelude::OrderItem),
                schema.create_table_from_entity(entity::prelude::Course),
                schema.create_table_from_entity(entity::prelude::Product),
                schema.create_table_from_entity(entity::prelude::EntitlementReview),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (customer_id, email) in self.customers {
            setup.customer().insert_customer(&customer_id, &email).await?;
        }

        for course in self.courses {
            setup.catalog().insert_course(course).await?;
        }

        for product in self.products {
            setup.catalog().insert_product(product).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
