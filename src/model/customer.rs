use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::model::db::{CustomerModel, EnrollmentModel};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CustomerDto {
    pub id: String,
    pub auth_uid: Option<String>,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub total_orders: i64,
    pub total_spent: i64,
    #[schema(value_type = Vec<String>)]
    pub tags: serde_json::Value,
    pub enrolled_courses: Vec<EnrollmentDto>,
    pub migrated_from: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_order_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EnrollmentDto {
    pub course_id: String,
    pub product_id: Option<String>,
    pub order_id: String,
    pub access_from: DateTime<Utc>,
    pub access_to: Option<DateTime<Utc>>,
}

/// How a login was reconciled with the stored customer records
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentityAction {
    /// No record existed for the stable id or the email; a fresh one was written
    Created,
    /// A legacy record was moved onto the stable id and deleted
    Migrated,
    /// A record already existed for the stable id
    Unchanged,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResolveIdentityRequest {
    pub stable_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IdentityResolutionDto {
    pub customer: CustomerDto,
    pub action: IdentityAction,
    /// Historical orders re-owned by the stable id during this call
    pub linked_orders: u64,
}

impl CustomerDto {
    pub fn from_models(customer: CustomerModel, enrollments: Vec<EnrollmentModel>) -> Self {
        Self {
            id: customer.id,
            auth_uid: customer.auth_uid,
            email: customer.email,
            name: customer.name,
            phone: customer.phone,
            dni: customer.dni,
            address: customer.address,
            total_orders: customer.total_orders,
            total_spent: customer.total_spent,
            tags: customer.tags,
            enrolled_courses: enrollments.into_iter().map(EnrollmentDto::from).collect(),
            migrated_from: customer.migrated_from,
            created_at: customer.created_at.and_utc(),
            last_order_at: customer.last_order_at.map(|t| t.and_utc()),
        }
    }
}

impl From<EnrollmentModel> for EnrollmentDto {
    fn from(enrollment: EnrollmentModel) -> Self {
        Self {
            course_id: enrollment.course_id,
            product_id: enrollment.product_id,
            order_id: enrollment.order_id,
            access_from: enrollment.access_from.and_utc(),
            access_to: enrollment.access_to.map(|t| t.and_utc()),
        }
    }
}
