use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entity::sea_orm_active_enums::{OrderStatus, PaymentStatus};
use storefront::{
    model::entitlement::RepairRequest,
    server::controller::entitlement::{get_review_queue, repair_entitlements},
};

use super::*;

async fn store_with_unresolved_item() -> Result<TestContext, TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("uid-1", "buyer@example.com")
        .build()
        .await?;
    test.order()
        .insert_order_with_items(
            entity::order::Model {
                status: OrderStatus::Approved,
                payment_status: PaymentStatus::Paid,
                ..factory::mock_order("o-1", "uid-1", "buyer@example.com", 15000)
            },
            vec![factory::mock_course_item(
                "o-1",
                None,
                None,
                "Curso retirado",
                15000,
            )],
        )
        .await?;

    Ok(test)
}

/// A committed repair queues unresolved items, which the review endpoint then lists
///
/// Expected: Ok with 200 OK for both endpoints
#[tokio::test]
async fn repair_fills_review_queue() -> Result<(), TestError> {
    let test = store_with_unresolved_item().await?;

    let result = repair_entitlements(
        State(app_state(&test)),
        Json(RepairRequest { dry_run: false }),
    )
    .await;
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["scanned_orders"], 1);
    assert_eq!(body["unresolved"][0]["item_name"], "Curso retirado");

    let resp = get_review_queue(State(app_state(&test)))
        .await
        .unwrap()
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["order_id"], "o-1");

    Ok(())
}

/// Expected: Ok with 200 OK and an empty review queue afterwards
#[tokio::test]
async fn dry_run_repair_writes_nothing() -> Result<(), TestError> {
    let test = store_with_unresolved_item().await?;

    let result = repair_entitlements(
        State(app_state(&test)),
        Json(RepairRequest { dry_run: true }),
    )
    .await;
    let body = json_body(result.unwrap().into_response()).await;
    assert_eq!(body["dry_run"], true);

    let body = json_body(
        get_review_queue(State(app_state(&test)))
            .await
            .unwrap()
            .into_response(),
    )
    .await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));

    Ok(())
}
