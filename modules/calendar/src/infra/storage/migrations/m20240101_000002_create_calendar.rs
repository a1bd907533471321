use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserEvents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserEvents::UserId).big_integer().not_null())
                    .col(ColumnDef::new(UserEvents::EventId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserEvents::UserId)
                            .col(UserEvents::EventId),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the delete-event cascade, which scans by event.
        manager
            .create_index(
                Index::create()
                    .name("idx_user_events_event")
                    .table(UserEvents::Table)
                    .col(UserEvents::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventReplicas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventReplicas::EventId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventReplicas::Name).string().not_null())
                    .col(
                        ColumnDef::new(EventReplicas::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventReplicas::Location).string().not_null())
                    .col(ColumnDef::new(EventReplicas::Tags).string().not_null())
                    .col(ColumnDef::new(EventReplicas::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(EventReplicas::Datetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventReplicas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserEvents {
    Table,
    UserId,
    EventId,
}

#[derive(DeriveIden)]
enum EventReplicas {
    Table,
    EventId,
    Name,
    Description,
    Location,
    Tags,
    CreatedBy,
    Datetime,
}
