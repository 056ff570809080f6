use chrono::NaiveDateTime;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};

use crate::server::model::db::EnrollmentModel;

/// An enrollment to write for a customer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEnrollment {
    pub customer_id: String,
    pub course_id: String,
    pub product_id: Option<String>,
    pub order_id: String,
    pub access_from: NaiveDateTime,
}

pub struct EnrollmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EnrollmentRepository<'a, C> {
    /// Creates a new instance of [`EnrollmentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Vec<EnrollmentModel>, DbErr> {
        entity::prelude::CustomerEnrollment::find()
            .filter(entity::customer_enrollment::Column::CustomerId.eq(customer_id))
            .order_by_asc(entity::customer_enrollment::Column::AccessFrom)
            .order_by_asc(entity::customer_enrollment::Column::CourseId)
            .all(self.db)
            .await
    }

    /// Gets the enrollments of several customers at once
    pub async fn get_by_customer_ids(
        &self,
        customer_ids: &[String],
    ) -> Result<Vec<EnrollmentModel>, DbErr> {
        if customer_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::CustomerEnrollment::find()
            .filter(
                entity::customer_enrollment::Column::CustomerId.is_in(customer_ids.iter().cloned()),
            )
            .all(self.db)
            .await
    }

    /// Grants a course to a customer unless they are already enrolled in it
    ///
    /// Returns `true` when a new enrollment was written.
    ///
    /// # Notes
    /// - The customer must exist due to the foreign key constraint
    pub async fn grant(&self, enrollment: NewEnrollment) -> Result<bool, DbErr> {
        let rows = entity::prelude::CustomerEnrollment::insert(
            entity::customer_enrollment::ActiveModel {
                customer_id: ActiveValue::Set(enrollment.customer_id),
                course_id: ActiveValue::Set(enrollment.course_id),
                product_id: ActiveValue::Set(enrollment.product_id),
                order_id: ActiveValue::Set(enrollment.order_id),
                access_from: ActiveValue::Set(enrollment.access_from),
                access_to: ActiveValue::Set(None),
            },
        )
        .on_conflict(
            OnConflict::columns([
                entity::customer_enrollment::Column::CustomerId,
                entity::customer_enrollment::Column::CourseId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(rows > 0)
    }

    /// Moves every enrollment of `from_customer_id` onto `to_customer_id`
    ///
    /// Courses the target customer is already enrolled in keep the target's enrollment. The
    /// source customer ends up with no enrollments. Returns the number of enrollments copied.
    ///
    /// # Notes
    /// - The target customer must exist due to the foreign key constraint
    /// - Pass a transaction as the connection to move enrollments atomically
    pub async fn reassign(&self, from_customer_id: &str, to_customer_id: &str) -> Result<u64, DbErr> {
        let enrollments = self.get_by_customer_id(from_customer_id).await?;

        let copied = if enrollments.is_empty() {
            0
        } else {
            let moved = enrollments.into_iter().map(|enrollment| {
                let mut enrollment = enrollment.into_active_model();
                enrollment.customer_id = ActiveValue::Set(to_customer_id.to_string());
                enrollment
            });

            entity::prelude::CustomerEnrollment::insert_many(moved)
                .on_conflict(
                    OnConflict::columns([
                        entity::customer_enrollment::Column::CustomerId,
                        entity::customer_enrollment::Column::CourseId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?
        };

        entity::prelude::CustomerEnrollment::delete_many()
            .filter(entity::customer_enrollment::Column::CustomerId.eq(from_customer_id))
            .exec(self.db)
            .await?;

        Ok(copied)
    }
}
