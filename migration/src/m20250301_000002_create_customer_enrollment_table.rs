use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_customer_table::Customer;

static FK_CUSTOMER_ENROLLMENT_CUSTOMER_ID: &str = "fk_customer_enrollment_customer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerEnrollment::Table)
                    .if_not_exists()
                    .col(text(CustomerEnrollment::CustomerId))
                    .col(text(CustomerEnrollment::CourseId))
                    .col(text_null(CustomerEnrollment::ProductId))
                    .col(text(CustomerEnrollment::OrderId))
                    .col(timestamp(CustomerEnrollment::AccessFrom))
                    .col(timestamp_null(CustomerEnrollment::AccessTo))
                    .primary_key(
                        Index::create()
                            .col(CustomerEnrollment::CustomerId)
                            .col(CustomerEnrollment::CourseId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CUSTOMER_ENROLLMENT_CUSTOMER_ID)
                    .from_tbl(CustomerEnrollment::Table)
                    .from_col(CustomerEnrollment::CustomerId)
                    .to_tbl(Customer::Table)
                    .to_col(Customer::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CUSTOMER_ENROLLMENT_CUSTOMER_ID)
                    .table(CustomerEnrollment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CustomerEnrollment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CustomerEnrollment {
    Table,
    CustomerId,
    CourseId,
    ProductId,
    OrderId,
    AccessFrom,
    AccessTo,
}
