use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, stats::DashboardStats},
    server::{error::Error, model::app::AppState, service::stats::StatsService},
};

pub static STATS_TAG: &str = "stats";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// Only count orders placed at this location
    pub location: Option<String>,
}

/// Get dashboard statistics
///
/// Figures come from a bounded scan of recent orders; `scan.complete` is false when the
/// row budget cut the scan short.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = STATS_TAG,
    params(StatsQuery),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, Error> {
    let stats = StatsService::new(&state.db, state.stats_row_budget)
        .compute_stats(query.location.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(stats)))
}
