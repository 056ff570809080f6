use super::*;

/// Should report false when granting a course the customer already has
#[tokio::test]
async fn grant_skips_existing_enrollment() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("uid-1", "student@example.com")
        .build()
        .await?;
    let enrollment_repo = EnrollmentRepository::new(&test.db);

    let first = enrollment_repo
        .grant(new_enrollment("uid-1", "course-1", "order-1"))
        .await?;
    let second = enrollment_repo
        .grant(new_enrollment("uid-1", "course-1", "order-2"))
        .await?;

    assert!(first);
    assert!(!second);
    let enrollments = enrollment_repo.get_by_customer_id("uid-1").await?;
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].order_id, "order-1");

    Ok(())
}

/// Should move enrollments and keep the target's own enrollment on overlap
#[tokio::test]
async fn reassign_moves_enrollments_without_duplicates() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("legacy-1", "student@example.com")
        .with_customer("uid-1", "student@example.com")
        .build()
        .await?;
    test.customer()
        .insert_enrollment("legacy-1", "course-1", "order-old-1")
        .await?;
    test.customer()
        .insert_enrollment("legacy-1", "course-2", "order-old-2")
        .await?;
    test.customer()
        .insert_enrollment("uid-1", "course-2", "order-new")
        .await?;

    let enrollment_repo = EnrollmentRepository::new(&test.db);
    let copied = enrollment_repo.reassign("legacy-1", "uid-1").await?;

    assert_eq!(copied, 1);
    assert!(enrollment_repo.get_by_customer_id("legacy-1").await?.is_empty());

    let mut moved = enrollment_repo.get_by_customer_id("uid-1").await?;
    moved.sort_by(|a, b| a.course_id.cmp(&b.course_id));
    assert_eq!(moved.len(), 2);
    assert_eq!(moved[0].order_id, "order-old-1");
    assert_eq!(moved[1].order_id, "order-new");

    Ok(())
}

/// Reassigning from a customer without enrollments copies nothing
#[tokio::test]
async fn reassign_without_enrollments() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_customer("legacy-1", "student@example.com")
        .with_customer("uid-1", "student@example.com")
        .build()
        .await?;
    let enrollment_repo = EnrollmentRepository::new(&test.db);

    let copied = enrollment_repo.reassign("legacy-1", "uid-1").await?;

    assert_eq!(copied, 0);

    Ok(())
}
