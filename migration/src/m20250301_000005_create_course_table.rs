use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(text(Course::Id).primary_key())
                    .col(text_uniq(Course::Slug))
                    .col(text(Course::Title))
                    .col(text_null(Course::ExternalCatalogId))
                    .col(text_null(Course::RelatedProductId))
                    .col(big_integer_null(Course::LegacyId))
                    .col(text(Course::Status))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Course {
    Table,
    Id,
    Slug,
    Title,
    ExternalCatalogId,
    RelatedProductId,
    LegacyId,
    Status,
}
