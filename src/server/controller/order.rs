use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        order::{CreateOrderRequest, OrderActionRequest, OrderDto, OrderTransitionDto},
    },
    server::{
        error::Error,
        model::app::AppState,
        service::order::{action::OrderAction, OrderService, TransitionOutcome},
    },
};

pub static ORDER_TAG: &str = "order";

/// Create an order from a checkout
///
/// Totals are computed server-side from the item quantities and unit prices.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = ORDER_TAG,
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderDto),
        (status = 400, description = "Order violates a checkout invariant", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, Error> {
    let (order, items) = OrderService::new(&state.db).create_order(request).await?;

    Ok((StatusCode::CREATED, Json(OrderDto::from_models(order, items))))
}

/// Apply a state machine action to an order
///
/// Accepted actions are `mark_as_paid`, `mark_as_cancelled`, `mark_as_refunded` and
/// `update_status`, the latter with an explicit `status` and/or `payment_status`.
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/actions",
    tag = ORDER_TAG,
    params(("order_id" = String, Path, description = "Id of the order")),
    request_body = OrderActionRequest,
    responses(
        (status = 200, description = "Action applied", body = OrderTransitionDto),
        (status = 400, description = "Unrecognized or incomplete action", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 409, description = "Order was modified concurrently", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn apply_order_action(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(request): Json<OrderActionRequest>,
) -> Result<impl IntoResponse, Error> {
    let action = OrderAction::parse(
        &order_id,
        &request.action,
        request.status,
        request.payment_status,
    )?;

    let outcome = OrderService::new(&state.db)
        .apply_action(&order_id, action)
        .await?;

    Ok((StatusCode::OK, Json(transition_dto(outcome))))
}

fn transition_dto(outcome: TransitionOutcome) -> OrderTransitionDto {
    OrderTransitionDto {
        action: outcome.action.name().to_string(),
        previous_status: outcome.previous.status,
        previous_payment_status: outcome.previous.payment_status,
        stats_applied: outcome.stats_applied,
        entitlements: outcome.entitlements,
        order: OrderDto::from_models(outcome.order, outcome.items),
    }
}
