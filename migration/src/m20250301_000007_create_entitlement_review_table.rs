use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EntitlementReview::Table)
                    .if_not_exists()
                    .col(integer(EntitlementReview::OrderItemId).primary_key())
                    .col(text(EntitlementReview::OrderId))
                    .col(text(EntitlementReview::ItemName))
                    .col(text_null(EntitlementReview::ProductId))
                    .col(timestamp(EntitlementReview::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EntitlementReview::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum EntitlementReview {
    Table,
    OrderItemId,
    OrderId,
    ItemName,
    ProductId,
    CreatedAt,
}
