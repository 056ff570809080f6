use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A customer's access grant to a course.
///
/// The composite primary key guarantees at most one enrollment per customer and course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_enrollment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub customer_id: String,
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub course_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub product_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub order_id: String,
    pub access_from: DateTime,
    /// `None` grants access indefinitely
    pub access_to: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
