use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        customer::{CustomerDto, IdentityResolutionDto, ResolveIdentityRequest},
    },
    server::{
        data::customer::enrollment::EnrollmentRepository, error::Error, model::app::AppState,
        service::identity::IdentityService,
    },
};

pub static IDENTITY_TAG: &str = "identity";

/// Reconcile an authenticated login with stored customer records
///
/// Called by the storefront after every successful sign-in. Migrates a legacy record
/// stored under the same email onto the stable id and links historical orders placed
/// with that email. Safe to repeat.
#[utoipa::path(
    post,
    path = "/api/identity/resolve",
    tag = IDENTITY_TAG,
    request_body = ResolveIdentityRequest,
    responses(
        (status = 200, description = "Identity resolved", body = IdentityResolutionDto),
        (status = 400, description = "Empty stable id or malformed email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resolve_identity(
    State(state): State<AppState>,
    Json(request): Json<ResolveIdentityRequest>,
) -> Result<impl IntoResponse, Error> {
    let identity = IdentityService::new(&state.db)
        .on_authenticated(
            &request.stable_id,
            &request.email,
            request.display_name.as_deref(),
        )
        .await?;

    let enrollments = EnrollmentRepository::new(&state.db)
        .get_by_customer_id(&identity.customer.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(IdentityResolutionDto {
            customer: CustomerDto::from_models(identity.customer, enrollments),
            action: identity.action,
            linked_orders: identity.linked_orders,
        }),
    ))
}
