use entity::sea_orm_active_enums::{OrderStatus, PaymentStatus};
use storefront_test_utils::prelude::*;

use crate::server::{
    config::Config,
    data::customer::enrollment::EnrollmentRepository,
    scheduler::{run_entitlement_repair, Scheduler},
};

async fn store_with_unenrolled_buyer() -> Result<TestContext, TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("uid-1", "buyer@example.com")
        .with_course(factory::mock_course("course-1", "molderia", "Moldería"))
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
                Some("molderia"),
                None,
                "Moldería",
                15000,
            )],
        )
        .await?;

    Ok(test)
}

fn config(cron: &str) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        stats_row_budget: 1000,
        entitlement_repair_cron: cron.to_string(),
        entitlement_repair_commit: false,
    }
}

/// Without commit the scheduled repair only reports
#[tokio::test]
async fn scheduled_repair_defaults_to_dry_run() -> Result<(), TestError> {
    let test = store_with_unenrolled_buyer().await?;

    let report = run_entitlement_repair(&test.db, false).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(report.enrollments_granted, 1);
    assert!(EnrollmentRepository::new(&test.db)
        .get_by_customer_id("uid-1")
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
async fn scheduled_repair_commits_when_enabled() -> Result<(), TestError> {
    let test = store_with_unenrolled_buyer().await?;

    let report = run_entitlement_repair(&test.db, true).await.unwrap();

    assert!(!report.dry_run);
    assert_eq!(
        EnrollmentRepository::new(&test.db)
            .get_by_customer_id("uid-1")
            .await?
            .len(),
        1
    );

    Ok(())
}

#[tokio::test]
async fn rejects_invalid_cron_expression() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let scheduler = Scheduler::new(test.db.clone(), &config("not a cron"))
        .await
        .unwrap();

    assert!(scheduler.start().await.is_err());

    Ok(())
}
