use sea_orm::{EntityTrait, IntoActiveModel};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn catalog(&self) -> CatalogFixtures<'_> {
        CatalogFixtures { setup: self }
    }
}

pub struct CatalogFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> CatalogFixtures<'a> {
    pub async fn insert_course(
        &self,
        course: entity::course::Model,
    ) -> Result<entity::course::Model, TestError> {
        Ok(entity::prelude::Course::insert(course.into_active_model())
            .exec_with_returning(&self.setup.db)
            .await?)
    }

    pub async fn insert_product(
        &self,
        product: entity::product::Model,
    ) -> Result<entity::product::Model, TestError> {
        Ok(entity::prelude::Product::insert(product.into_active_model())
            .exec_with_returning(&self.setup.db)
            .await?)
    }
}
