//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extracted arguments, verifying status codes and the
//! mapping of domain errors onto HTTP responses.

mod customer;
mod entitlement;
mod identity;
mod order;
mod stats;

use axum::{body::to_bytes, response::Response};
use storefront::server::model::app::AppState;
use storefront_test_utils::prelude::*;

const TEST_ROW_BUDGET: u64 = 1000;

fn app_state(test: &TestContext) -> AppState {
    AppState {
        db: test.db.clone(),
        stats_row_budget: TEST_ROW_BUDGET,
    }
}

/// Reads a response body as JSON
async fn json_body(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");

    serde_json::from_slice(&bytes).expect("body should be JSON")
}
