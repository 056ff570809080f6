use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text", unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    /// Id of the generic catalog product sold as this course
    #[sea_orm(column_type = "Text", nullable)]
    pub external_catalog_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub related_product_id: Option<String>,
    /// Numeric id from the previous course platform
    pub legacy_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
