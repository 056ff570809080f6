use super::*;

/// A record already stored under the stable id is returned unchanged
#[tokio::test]
async fn returns_existing_record_unchanged() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("uid-1", "ana@example.com")
        .build()
        .await?;

    let identity_service = IdentityService::new(&test.db);
    let resolved = identity_service
        .resolve_identity("uid-1", "ana@example.com", Some("Ana"))
        .await
        .unwrap();

    assert_eq!(resolved.action, IdentityAction::Unchanged);
    assert_eq!(resolved.customer.id, "uid-1");

    Ok(())
}

/// A legacy record found by email is moved onto the stable id and deleted
#[tokio::test]
async fn migrates_legacy_record() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let mut legacy = factory::mock_customer("legacy-1", "Abbi5@gmail.com");
    legacy.name = "Abbi".to_string();
    legacy.phone = Some("351-555-0101".to_string());
    legacy.dni = Some("30111222".to_string());
    legacy.total_orders = 3;
    legacy.total_spent = 42000;
    legacy.tags = serde_json::json!(["vip"]);
    legacy.created_at = Utc::now().naive_utc() - Duration::days(400);
    let legacy = test.customer().insert(legacy).await?;
    test.customer()
        .insert_enrollment("legacy-1", "course-1", "order-1")
        .await?;

    let identity_service = IdentityService::new(&test.db);
    let resolved = identity_service
        .resolve_identity("uid-1", "abbi5@gmail.com", None)
        .await
        .unwrap();

    assert_eq!(resolved.action, IdentityAction::Migrated);
    let customer = resolved.customer;
    assert_eq!(customer.id, "uid-1");
    assert_eq!(customer.auth_uid.as_deref(), Some("uid-1"));
    assert_eq!(customer.email, "abbi5@gmail.com");
    assert_eq!(customer.migrated_from.as_deref(), Some("legacy-1"));
    assert_eq!(customer.name, "Abbi");
    assert_eq!(customer.phone, legacy.phone);
    assert_eq!(customer.dni, legacy.dni);
    assert_eq!(customer.created_at, legacy.created_at);
    assert_eq!(customer.total_orders, 3);
    assert_eq!(customer.total_spent, 42000);
    assert_eq!(customer.tags, serde_json::json!(["vip"]));

    let customer_repo = CustomerRepository::new(&test.db);
    assert!(customer_repo.get_by_id("legacy-1").await?.is_none());
    assert!(customer_repo.get_by_id("uid-1").await?.is_some());

    let enrollments = EnrollmentRepository::new(&test.db)
        .get_by_customer_id("uid-1")
        .await?;
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].course_id, "course-1");

    Ok(())
}

/// The second login after a migration reports unchanged
#[tokio::test]
async fn migration_is_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("legacy-1", "ana@example.com")
        .build()
        .await?;

    let identity_service = IdentityService::new(&test.db);
    let first = identity_service
        .resolve_identity("uid-1", "ana@example.com", None)
        .await
        .unwrap();
    let second = identity_service
        .resolve_identity("uid-1", "ana@example.com", None)
        .await
        .unwrap();

    assert_eq!(first.action, IdentityAction::Migrated);
    assert_eq!(second.action, IdentityAction::Unchanged);
    assert_eq!(second.customer, first.customer);

    Ok(())
}

/// Without any record a fresh one is created with zeroed counters
#[tokio::test]
async fn creates_fresh_record() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let identity_service = IdentityService::new(&test.db);
    let resolved = identity_service
        .resolve_identity("uid-1", " Maria.Lopez@Example.com ", None)
        .await
        .unwrap();

    assert_eq!(resolved.action, IdentityAction::Created);
    let customer = resolved.customer;
    assert_eq!(customer.email, "maria.lopez@example.com");
    assert_eq!(customer.name, "maria.lopez");
    assert_eq!(customer.total_orders, 0);
    assert_eq!(customer.total_spent, 0);
    assert!(customer.migrated_from.is_none());

    let stored = CustomerRepository::new(&test.db)
        .get_by_id("uid-1")
        .await?
        .expect("customer should exist");
    assert_eq!(stored, customer);

    Ok(())
}

/// The display name wins over the email local part
#[tokio::test]
async fn fresh_record_uses_display_name() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let resolved = IdentityService::new(&test.db)
        .resolve_identity("uid-1", "maria@example.com", Some("María López"))
        .await
        .unwrap();

    assert_eq!(resolved.customer.name, "María López");

    Ok(())
}

/// Invalid payloads are rejected before any lookup
#[tokio::test]
async fn rejects_invalid_identity() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    let identity_service = IdentityService::new(&test.db);

    let empty_id = identity_service
        .resolve_identity("  ", "ana@example.com", None)
        .await;
    let bad_email = identity_service
        .resolve_identity("uid-1", "not-an-email", None)
        .await;

    assert!(matches!(
        empty_id,
        Err(Error::IdentityError(IdentityError::InvalidIdentity { .. }))
    ));
    assert!(matches!(
        bad_email,
        Err(Error::IdentityError(IdentityError::InvalidIdentity { .. }))
    ));

    Ok(())
}

/// Losing the insert race to a concurrent login rolls back and reports unchanged
#[tokio::test]
async fn migration_conflict_falls_back_to_existing_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("legacy-1", "ana@example.com")
        .with_customer("uid-1", "ana@example.com")
        .build()
        .await?;
    let customer_repo = CustomerRepository::new(&test.db);
    let legacy = customer_repo
        .get_by_id("legacy-1")
        .await?
        .expect("legacy customer should exist");

    let resolved = IdentityService::new(&test.db)
        .migrate_legacy(legacy, "uid-1", "ana@example.com")
        .await
        .unwrap()
        .expect("existing record should be returned");

    assert_eq!(resolved.action, IdentityAction::Unchanged);
    assert!(resolved.customer.migrated_from.is_none());
    // The rolled back transaction must not have deleted the legacy record
    assert!(customer_repo.get_by_id("legacy-1").await?.is_some());

    Ok(())
}

/// A legacy record consumed by another identity rolls back the migration
#[tokio::test]
async fn migration_of_consumed_legacy_record_rolls_back() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    // Never inserted: simulates a legacy record deleted by a concurrent migration
    let legacy = factory::mock_customer("legacy-1", "ana@example.com");

    let resolved = IdentityService::new(&test.db)
        .migrate_legacy(legacy, "uid-1", "ana@example.com")
        .await
        .unwrap();

    assert!(resolved.is_none());
    assert!(CustomerRepository::new(&test.db)
        .get_by_id("uid-1")
        .await?
        .is_none());

    Ok(())
}

/// Looking up an unknown customer is a not-found error
#[tokio::test]
async fn get_customer_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let result = IdentityService::new(&test.db).get_customer("ghost").await;

    assert!(matches!(
        result,
        Err(Error::IdentityError(IdentityError::CustomerNotFound(_)))
    ));

    Ok(())
}
