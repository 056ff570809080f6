//! Read-only access to the course and product catalog.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::db::{CourseModel, ProductModel};

pub struct CatalogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CatalogRepository<'a, C> {
    /// Creates a new instance of [`CatalogRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets every course ordered by id
    pub async fn get_all_courses(&self) -> Result<Vec<CourseModel>, DbErr> {
        entity::prelude::Course::find()
            .order_by_asc(entity::course::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_products_by_ids(
        &self,
        product_ids: &[String],
    ) -> Result<Vec<ProductModel>, DbErr> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Product::find()
            .filter(entity::product::Column::Id.is_in(product_ids.iter().cloned()))
            .order_by_asc(entity::product::Column::Id)
            .all(self.db)
            .await
    }

    /// Counts products without reading them
    pub async fn count_products(&self) -> Result<u64, DbErr> {
        entity::prelude::Product::find().count(self.db).await
    }
}
