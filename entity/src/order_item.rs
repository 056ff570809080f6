use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::OrderItemType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub order_id: String,
    pub item_type: OrderItemType,
    #[sea_orm(column_type = "Text", nullable)]
    pub product_id: Option<String>,
    /// Missing on items sold before course resolution existed
    #[sea_orm(column_type = "Text", nullable)]
    pub course_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
