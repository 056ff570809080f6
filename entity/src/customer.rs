use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A storefront customer.
///
/// Records created after stable identities exist are keyed by the authentication
/// provider's stable id. Legacy records carry an arbitrary generated id and are
/// superseded by a merge on the customer's first authentication.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub auth_uid: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub phone: Option<String>,
    /// National identity document number
    #[sea_orm(column_type = "Text", nullable)]
    pub dni: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub total_orders: i64,
    pub total_spent: i64,
    /// JSON array of free-form tags
    pub tags: Json,
    /// Id of the legacy record this one superseded
    #[sea_orm(column_type = "Text", nullable)]
    pub migrated_from: Option<String>,
    pub created_at: DateTime,
    pub last_order_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::customer_enrollment::Entity")]
    CustomerEnrollment,
}

impl Related<super::customer_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerEnrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
