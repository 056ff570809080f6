use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000003_create_orders_table::Orders;

static IDX_ORDER_ITEM_ORDER_ID: &str = "idx_order_item_order_id";
static FK_ORDER_ITEM_ORDER_ID: &str = "fk_order_item_order_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderItem::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderItem::Id))
                    .col(text(OrderItem::OrderId))
                    .col(string(OrderItem::ItemType))
                    .col(text_null(OrderItem::ProductId))
                    .col(text_null(OrderItem::CourseId))
                    .col(text(OrderItem::Name))
                    .col(integer(OrderItem::Quantity))
                    .col(big_integer(OrderItem::UnitPrice))
                    .col(big_integer(OrderItem::Total))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ORDER_ITEM_ORDER_ID)
                    .table(OrderItem::Table)
                    .col(OrderItem::OrderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ORDER_ITEM_ORDER_ID)
                    .from_tbl(OrderItem::Table)
                    .from_col(OrderItem::OrderId)
                    .to_tbl(Orders::Table)
                    .to_col(Orders::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ORDER_ITEM_ORDER_ID)
                    .table(OrderItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ORDER_ITEM_ORDER_ID)
                    .table(OrderItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OrderItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum OrderItem {
    Table,
    Id,
    OrderId,
    ItemType,
    ProductId,
    CourseId,
    Name,
    Quantity,
    UnitPrice,
    Total,
}
