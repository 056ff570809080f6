use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use storefront::{
    model::customer::ResolveIdentityRequest, server::controller::identity::resolve_identity,
};

use super::*;

fn request(stable_id: &str, email: &str) -> ResolveIdentityRequest {
    ResolveIdentityRequest {
        stable_id: stable_id.to_string(),
        email: email.to_string(),
        display_name: None,
    }
}

/// A first login migrates the legacy record and links its orders
///
/// Expected: Ok with 200 OK, action "migrated" and the legacy order linked
#[tokio::test]
async fn migrates_legacy_customer_on_first_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("legacy-1", "abbi5@example.com")
        .build()
        .await?;
    test.order()
        .insert_order(factory::mock_order(
            "o-1",
            "legacy-1",
            "Abbi5@example.com",
            15000,
        ))
        .await?;

    let result = resolve_identity(
        State(app_state(&test)),
        Json(request("uid-1", "Abbi5@Example.com")),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["action"], "migrated");
    assert_eq!(body["customer"]["id"], "uid-1");
    assert_eq!(body["customer"]["migrated_from"], "legacy-1");
    assert_eq!(body["linked_orders"], 1);

    Ok(())
}

/// Repeating the same login changes nothing
///
/// Expected: Ok with 200 OK, action "unchanged" and no orders linked
#[tokio::test]
async fn repeated_login_is_unchanged() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("uid-1", "buyer@example.com")
        .build()
        .await?;

    let result = resolve_identity(
        State(app_state(&test)),
        Json(request("uid-1", "buyer@example.com")),
    )
    .await;

    let body = json_body(result.unwrap().into_response()).await;
    assert_eq!(body["action"], "unchanged");
    assert_eq!(body["linked_orders"], 0);

    Ok(())
}

/// Expected: Err with 400 Bad Request
#[tokio::test]
async fn rejects_malformed_email() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let result = resolve_identity(State(app_state(&test)), Json(request("uid-1", "not-an-email"))).await;

    let resp = result.err().expect("should fail").into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
