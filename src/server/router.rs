//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its OpenAPI specification, and
//! Swagger UI serves the collected document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/identity/resolve` - Reconcile a login with stored customer records
/// - `GET /api/customers/{customer_id}` - Get a customer with their enrollments
/// - `POST /api/orders` - Create an order
/// - `POST /api/orders/{order_id}/actions` - Apply a state machine action to an order
/// - `GET /api/stats` - Dashboard statistics
/// - `POST /api/entitlements/repair` - Batch entitlement repair
/// - `GET /api/entitlements/review` - Items awaiting manual course assignment
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, stats_row_budget: 1000 };
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Storefront", description = "Storefront back-office API"), tags(
        (name = controller::identity::IDENTITY_TAG, description = "Login identity reconciliation"),
        (name = controller::customer::CUSTOMER_TAG, description = "Customer records"),
        (name = controller::order::ORDER_TAG, description = "Order lifecycle"),
        (name = controller::stats::STATS_TAG, description = "Dashboard statistics"),
        (name = controller::entitlement::ENTITLEMENT_TAG, description = "Course entitlements"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::identity::resolve_identity))
        .routes(routes!(controller::customer::get_customer))
        .routes(routes!(controller::order::create_order))
        .routes(routes!(controller::order::apply_order_action))
        .routes(routes!(controller::stats::get_stats))
        .routes(routes!(controller::entitlement::repair_entitlements))
        .routes(routes!(controller::entitlement::get_review_queue))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
