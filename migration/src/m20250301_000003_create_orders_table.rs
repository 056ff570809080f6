use sea_orm_migration::{prelude::*, schema::*};

static IDX_ORDERS_CUSTOMER_EMAIL: &str = "idx_orders_customer_email";
static IDX_ORDERS_CUSTOMER_ID: &str = "idx_orders_customer_id";
/// Composite index backing the dashboard's sorted, location-filtered scan
static IDX_ORDERS_LOCATION_CREATED_AT: &str = "idx_orders_location_created_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(text(Orders::Id).primary_key())
                    .col(string(Orders::Status))
                    .col(string(Orders::PaymentStatus))
                    .col(string(Orders::PaymentMethod))
                    .col(text(Orders::CustomerId))
                    .col(text(Orders::CustomerName))
                    .col(text(Orders::CustomerEmail))
                    .col(text_null(Orders::CustomerPhone))
                    .col(big_integer(Orders::TotalAmount))
                    .col(text(Orders::Currency))
                    .col(text_null(Orders::Location))
                    .col(json_null(Orders::Metadata))
                    .col(text_null(Orders::GatewayPreferenceId))
                    .col(text_null(Orders::GatewayPaymentId))
                    .col(timestamp(Orders::CreatedAt))
                    .col(timestamp(Orders::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ORDERS_CUSTOMER_EMAIL)
                    .table(Orders::Table)
                    .col(Orders::CustomerEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ORDERS_CUSTOMER_ID)
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ORDERS_LOCATION_CREATED_AT)
                    .table(Orders::Table)
                    .col(Orders::Location)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            IDX_ORDERS_LOCATION_CREATED_AT,
            IDX_ORDERS_CUSTOMER_ID,
            IDX_ORDERS_CUSTOMER_EMAIL,
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Orders::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Orders {
    Table,
    Id,
    Status,
    PaymentStatus,
    PaymentMethod,
    CustomerId,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    TotalAmount,
    Currency,
    Location,
    Metadata,
    GatewayPreferenceId,
    GatewayPaymentId,
    CreatedAt,
    UpdatedAt,
}
