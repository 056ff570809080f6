use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, customer::CustomerDto},
    server::{error::Error, model::app::AppState, service::identity::IdentityService},
};

pub static CUSTOMER_TAG: &str = "customer";

/// Get a customer with their enrolled courses
#[utoipa::path(
    get,
    path = "/api/customers/{customer_id}",
    tag = CUSTOMER_TAG,
    params(("customer_id" = String, Path, description = "Stable id of the customer")),
    responses(
        (status = 200, description = "Customer found", body = CustomerDto),
        (status = 404, description = "Customer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let (customer, enrollments) = IdentityService::new(&state.db)
        .get_customer(&customer_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CustomerDto::from_models(customer, enrollments)),
    ))
}
