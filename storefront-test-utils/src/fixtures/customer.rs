use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait, IntoActiveModel};

use crate::{error::TestError, factory, TestContext};

impl TestContext {
    pub fn customer(&self) -> CustomerFixtures<'_> {
        CustomerFixtures { setup: self }
    }
}

pub struct CustomerFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> CustomerFixtures<'a> {
    /// Insert a customer with zeroed counters.
    pub async fn insert_customer(
        &self,
        customer_id: &str,
        email: &str,
    ) -> Result<entity::customer::Model, TestError> {
        self.insert(factory::mock_customer(customer_id, email)).await
    }

    /// Insert an arbitrary customer model as-is.
    pub async fn insert(
        &self,
        customer: entity::customer::Model,
    ) -> Result<entity::customer::Model, TestError> {
        Ok(
            entity::prelude::Customer::insert(customer.into_active_model())
                .exec_with_returning(&self.setup.db)
                .await?,
        )
    }

    /// Insert an enrollment granting `course_id` to `customer_id` from now on.
    pub async fn insert_enrollment(
        &self,
        customer_id: &str,
        course_id: &str,
        order_id: &str,
    ) -> Result<entity::customer_enrollment::Model, TestError> {
        Ok(entity::prelude::CustomerEnrollment::insert(
            entity::customer_enrollment::ActiveModel {
                customer_id: ActiveValue::Set(customer_id.to_string()),
                course_id: ActiveValue::Set(course_id.to_string()),
                product_id: ActiveValue::Set(None),
                order_id: ActiveValue::Set(order_id.to_string()),
                access_from: ActiveValue::Set(Utc::now().naive_utc()),
                access_to: ActiveValue::Set(None),
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
