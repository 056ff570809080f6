use sea_orm_migration::{prelude::*, schema::*};

static IDX_CUSTOMER_EMAIL: &str = "idx_customer_email";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(text(Customer::Id).primary_key())
                    .col(text_null(Customer::AuthUid))
                    .col(text(Customer::Email))
                    .col(text(Customer::Name))
                    .col(text_null(Customer::Phone))
                    .col(text_null(Customer::Dni))
                    .col(text_null(Customer::Address))
                    .col(big_integer(Customer::TotalOrders).default(0))
                    .col(big_integer(Customer::TotalSpent).default(0))
                    .col(json(Customer::Tags))
                    .col(text_null(Customer::MigratedFrom))
                    .col(timestamp(Customer::CreatedAt))
                    .col(timestamp_null(Customer::LastOrderAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CUSTOMER_EMAIL)
                    .table(Customer::Table)
                    .col(Customer::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CUSTOMER_EMAIL)
                    .table(Customer::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Customer::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Customer {
    Table,
    Id,
    AuthUid,
    Email,
    Name,
    Phone,
    Dni,
    Address,
    TotalOrders,
    TotalSpent,
    Tags,
    MigratedFrom,
    CreatedAt,
    LastOrderAt,
}
