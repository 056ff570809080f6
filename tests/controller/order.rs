use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::sea_orm_active_enums::{OrderItemType, PaymentMethod};
use storefront::{
    model::order::{CreateOrderItemRequest, CreateOrderRequest, OrderActionRequest},
    server::controller::order::{apply_order_action, create_order},
};

use super::*;

fn action(name: &str) -> OrderActionRequest {
    OrderActionRequest {
        action: name.to_string(),
        status: None,
        payment_status: None,
    }
}

/// Expected: Ok with 201 Created and a server-computed total
#[tokio::test]
async fn creates_order() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let request = CreateOrderRequest {
        id: "o-1".to_string(),
        customer_id: "uid-1".to_string(),
        customer_name: "Buyer".to_string(),
        customer_email: "Buyer@Example.com".to_string(),
        customer_phone: None,
        payment_method: PaymentMethod::Transfer,
        currency: "ARS".to_string(),
        location: Some("palermo".to_string()),
        metadata: None,
        gateway_preference_id: None,
        items: vec![CreateOrderItemRequest {
            item_type: OrderItemType::Product,
            product_id: Some("p-1".to_string()),
            course_id: None,
            name: "Tijera".to_string(),
            quantity: 3,
            unit_price: 5000,
        }],
    };

    let result = create_order(State(app_state(&test)), Json(request)).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["total_amount"], 15000);
    assert_eq!(body["customer_email"], "buyer@example.com");
    assert_eq!(body["status"], "pending");

    Ok(())
}

/// Expected: Ok with 200 OK, the order approved and the sale recorded
#[tokio::test]
async fn marks_order_as_paid() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("uid-1", "buyer@example.com")
        .build()
        .await?;
    test.order()
        .insert_order(factory::mock_order("o-1", "uid-1", "buyer@example.com", 15000))
        .await?;

    let result = apply_order_action(
        State(app_state(&test)),
        Path("o-1".to_string()),
        Json(action("mark_as_paid")),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["action"], "mark_as_paid");
    assert_eq!(body["previous_status"], "pending");
    assert_eq!(body["order"]["status"], "approved");
    assert_eq!(body["order"]["payment_status"], "paid");
    assert_eq!(body["stats_applied"], true);

    Ok(())
}

/// Expected: Err with 400 Bad Request
#[tokio::test]
async fn rejects_unknown_action() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    test.order()
        .insert_order(factory::mock_order("o-1", "uid-1", "buyer@example.com", 15000))
        .await?;

    let result = apply_order_action(
        State(app_state(&test)),
        Path("o-1".to_string()),
        Json(action("mark_as_shipped")),
    )
    .await;

    let resp = result.err().expect("should fail").into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expected: Err with 404 Not Found
#[tokio::test]
async fn unknown_order_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let result = apply_order_action(
        State(app_state(&test)),
        Path("o-404".to_string()),
        Json(action("mark_as_paid")),
    )
    .await;

    let resp = result.err().expect("should fail").into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
