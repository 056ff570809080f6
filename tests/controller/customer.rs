use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use storefront::server::controller::customer::get_customer;

use super::*;

/// Expected: Ok with 200 OK including the customer's enrollments
#[tokio::test]
async fn returns_customer_with_enrollments() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("uid-1", "buyer@example.com")
        .with_course(factory::mock_course("course-1", "molderia", "Moldería"))
        .build()
        .await?;
    test.customer()
        .insert_enrollment("uid-1", "course-1", "o-1")
        .await?;

    let result = get_customer(State(app_state(&test)), Path("uid-1".to_string())).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["enrolled_courses"][0]["course_id"], "course-1");

    Ok(())
}

/// Expected: Err with 404 Not Found
#[tokio::test]
async fn unknown_customer_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let result = get_customer(State(app_state(&test)), Path("uid-404".to_string())).await;

    let resp = result.err().expect("should fail").into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
