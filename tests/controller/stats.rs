use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::sea_orm_active_enums::{OrderStatus, PaymentStatus};
use storefront::server::controller::stats::{get_stats, StatsQuery};

use super::*;

/// Expected: Ok with 200 OK and approved revenue for the requested location only
#[tokio::test]
async fn returns_location_stats() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_product(factory::mock_product("p-1", "Tijera", 5000))
        .build()
        .await?;
    for (order_id, location, total) in [("o-1", "palermo", 15000), ("o-2", "belgrano", 7000)] {
        test.order()
            .insert_order(entity::order::Model {
                status: OrderStatus::Approved,
                payment_status: PaymentStatus::Paid,
                location: Some(location.to_string()),
                ..factory::mock_order(order_id, "uid-1", "buyer@example.com", total)
            })
            .await?;
    }

    let result = get_stats(
        State(app_state(&test)),
        Query(StatsQuery {
            location: Some("palermo".to_string()),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["revenue"]["all_time"], 15000);
    assert_eq!(body["orders"]["approved"], 1);
    assert_eq!(body["product_count"], 1);
    assert_eq!(body["scan"]["complete"], true);

    Ok(())
}
