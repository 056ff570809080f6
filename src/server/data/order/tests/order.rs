use super::*;

/// Should attach every item to the created order and assign item ids
#[tokio::test]
async fn creates_order_with_items() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    let order_repo = OrderRepository::new(&test.db);

    let order = factory::mock_order("order-1", "uid-1", "buyer@example.com", 3000);
    let items = vec![
        factory::mock_product_item("ignored", "p-1", "Tijera", 1000),
        factory::mock_course_item("ignored", Some("p-2"), None, "Curso", 2000),
    ];
    let (order, items) = order_repo.create(order, items).await?;

    assert_eq!(order.id, "order-1");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.order_id == "order-1"));
    assert_ne!(items[0].id, items[1].id);

    let (_, stored_items) = order_repo
        .get_with_items("order-1")
        .await?
        .expect("order should exist");
    assert_eq!(stored_items, items);

    Ok(())
}

/// Should return None for an unknown order
#[tokio::test]
async fn get_with_items_for_missing_order() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    let order_repo = OrderRepository::new(&test.db);

    assert!(order_repo.get_with_items("missing").await?.is_none());

    Ok(())
}

/// Should match snapshot emails exactly, one variant per stored form
#[tokio::test]
async fn finds_orders_by_exact_emails() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    test.order()
        .insert_order(factory::mock_order("o-1", "anon-1", "abbi5@gmail.com", 100))
        .await?;
    test.order()
        .insert_order(factory::mock_order("o-2", "anon-2", "Abbi5@gmail.com", 100))
        .await?;
    test.order()
        .insert_order(factory::mock_order("o-3", "anon-3", "ABBI5@GMAIL.COM", 100))
        .await?;

    let order_repo = OrderRepository::new(&test.db);
    let found = order_repo
        .find_by_customer_emails(&["abbi5@gmail.com".to_string(), "Abbi5@gmail.com".to_string()])
        .await?;

    let mut ids: Vec<&str> = found.iter().map(|o| o.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["o-1", "o-2"]);

    Ok(())
}

/// Reassigning an order to its current owner writes nothing
#[tokio::test]
async fn reassign_customer_is_conditional() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    test.order()
        .insert_order(factory::mock_order("o-1", "anon-1", "a@example.com", 100))
        .await?;

    let order_repo = OrderRepository::new(&test.db);
    let now = Utc::now().naive_utc();
    let metadata = serde_json::json!({ "source": "web" });

    let first = order_repo
        .reassign_customer("o-1", "uid-1", metadata.clone(), now)
        .await?;
    let second = order_repo
        .reassign_customer("o-1", "uid-1", metadata.clone(), now)
        .await?;

    assert_eq!(first, 1);
    assert_eq!(second, 0);
    let stored = order_repo.get_by_id("o-1").await?.expect("order should exist");
    assert_eq!(stored.customer_id, "uid-1");
    assert_eq!(stored.metadata, Some(metadata));

    Ok(())
}

/// The status write only applies while the order is still in the expected state
#[tokio::test]
async fn update_status_requires_expected_state() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    test.order()
        .insert_order(factory::mock_order("o-1", "uid-1", "a@example.com", 100))
        .await?;

    let order_repo = OrderRepository::new(&test.db);
    let pending = OrderState {
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
    };
    let paid = OrderState {
        status: OrderStatus::Approved,
        payment_status: PaymentStatus::Paid,
    };
    let now = Utc::now().naive_utc();

    assert_eq!(order_repo.update_status("o-1", pending, paid, now).await?, 1);
    assert_eq!(order_repo.update_status("o-1", pending, paid, now).await?, 0);

    let stored = order_repo.get_by_id("o-1").await?.expect("order should exist");
    assert_eq!(OrderState::of(&stored), paid);
    assert!(OrderState::of(&stored).is_settled());

    Ok(())
}

/// Sorted scans return the newest orders of the location first and honor the limit
#[tokio::test]
async fn scan_filters_sorts_and_limits() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    let now = Utc::now().naive_utc();

    for (id, location, age_days) in [
        ("o-1", Some("cordoba"), 3),
        ("o-2", Some("cordoba"), 1),
        ("o-3", Some("rosario"), 0),
        ("o-4", Some("cordoba"), 2),
    ] {
        let mut order = factory::mock_order(id, "uid-1", "a@example.com", 100);
        order.location = location.map(str::to_string);
        order.created_at = now - Duration::days(age_days);
        test.order().insert_order(order).await?;
    }

    let order_repo = OrderRepository::new(&test.db);
    let scanned = order_repo.scan(Some("cordoba"), true, 2).await?;

    let ids: Vec<&str> = scanned.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["o-2", "o-4"]);

    let everything = order_repo.scan(None, false, 10).await?;
    assert_eq!(everything.len(), 4);

    Ok(())
}

/// Paid order pages are keyed by id and skip unpaid orders
#[tokio::test]
async fn pages_through_paid_orders() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    for (id, paid) in [("o-1", true), ("o-2", false), ("o-3", true), ("o-4", true)] {
        let mut order = factory::mock_order(id, "uid-1", "a@example.com", 100);
        if paid {
            order.status = OrderStatus::Approved;
            order.payment_status = PaymentStatus::Paid;
        }
        test.order().insert_order(order).await?;
    }

    let order_repo = OrderRepository::new(&test.db);
    let first = order_repo.find_paid_orders_page(None, 2).await?;
    let second = order_repo.find_paid_orders_page(Some("o-3"), 2).await?;

    let first_ids: Vec<&str> = first.iter().map(|o| o.id.as_str()).collect();
    let second_ids: Vec<&str> = second.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(first_ids, vec!["o-1", "o-3"]);
    assert_eq!(second_ids, vec!["o-4"]);

    Ok(())
}
