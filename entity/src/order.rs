use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{OrderStatus, PaymentMethod, PaymentStatus};

/// A checkout order.
///
/// The `customer_*` columns are a snapshot of the buyer's identity at purchase time and
/// are never rewritten; `customer_id` is the current owner and may be relinked.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    #[sea_orm(column_type = "Text")]
    pub customer_id: String,
    #[sea_orm(column_type = "Text")]
    pub customer_name: String,
    /// Lower-cased at creation; historical rows may not be
    #[sea_orm(column_type = "Text")]
    pub customer_email: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub customer_phone: Option<String>,
    pub total_amount: i64,
    #[sea_orm(column_type = "Text")]
    pub currency: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub location: Option<String>,
    pub metadata: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub gateway_preference_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub gateway_payment_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
