use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(ColumnDef::new(Events::Description).string().not_null())
                    .col(ColumnDef::new(Events::Location).string().not_null())
                    .col(ColumnDef::new(Events::Tags).string().not_null())
                    .col(ColumnDef::new(Events::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Events::Datetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::ImageHash).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Backs the (datetime, id) keyset order used by every listing.
        manager
            .create_index(
                Index::create()
                    .name("idx_events_datetime_id")
                    .table(Events::Table)
                    .col(Events::Datetime)
                    .col(Events::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_name_datetime")
                    .table(Events::Table)
                    .col(Events::Name)
                    .col(Events::Datetime)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    Location,
    Tags,
    CreatedBy,
    Datetime,
    ImageHash,
}
