use super::*;

/// First login migrates the legacy record and links its historical orders
#[tokio::test]
async fn migrates_and_links_on_first_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("legacy-1", "Abbi5@gmail.com")
        .build()
        .await?;
    test.order()
        .insert_order(factory::mock_order("o-1", "legacy-1", "Abbi5@gmail.com", 1000))
        .await?;
    test.order()
        .insert_order(factory::mock_order("o-2", "anon-9", "abbi5@gmail.com", 2000))
        .await?;

    let identity_service = IdentityService::new(&test.db);
    let first = identity_service
        .on_authenticated("uid-1", "Abbi5@gmail.com", Some("Abbi"))
        .await
        .unwrap();
    let second = identity_service
        .on_authenticated("uid-1", "Abbi5@gmail.com", Some("Abbi"))
        .await
        .unwrap();

    assert_eq!(first.action, IdentityAction::Migrated);
    assert_eq!(first.linked_orders, 2);
    assert_eq!(second.action, IdentityAction::Unchanged);
    assert_eq!(second.linked_orders, 0);

    Ok(())
}
