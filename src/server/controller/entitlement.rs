use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        entitlement::{EntitlementReviewDto, RepairReport, RepairRequest},
    },
    server::{
        data::review::EntitlementReviewRepository, error::Error, model::app::AppState,
        service::entitlement::EntitlementService,
    },
};

pub static ENTITLEMENT_TAG: &str = "entitlement";

/// Re-resolve every paid order and grant missing course enrollments
///
/// With `dry_run` nothing is written and the report counts what a real run would change.
#[utoipa::path(
    post,
    path = "/api/entitlements/repair",
    tag = ENTITLEMENT_TAG,
    request_body = RepairRequest,
    responses(
        (status = 200, description = "Repair finished", body = RepairReport),
        (status = 500, description = "Repair failed; re-running it is safe", body = ErrorDto)
    ),
)]
pub async fn repair_entitlements(
    State(state): State<AppState>,
    Json(request): Json<RepairRequest>,
) -> Result<impl IntoResponse, Error> {
    let report = EntitlementService::new(&state.db)
        .repair_entitlements(request.dry_run)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

/// List purchased course items no course could be matched to
#[utoipa::path(
    get,
    path = "/api/entitlements/review",
    tag = ENTITLEMENT_TAG,
    responses(
        (status = 200, description = "Items awaiting manual review", body = Vec<EntitlementReviewDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_review_queue(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let queue: Vec<EntitlementReviewDto> = EntitlementReviewRepository::new(&state.db)
        .list()
        .await?
        .into_iter()
        .map(EntitlementReviewDto::from)
        .collect();

    Ok((StatusCode::OK, Json(queue)))
}
