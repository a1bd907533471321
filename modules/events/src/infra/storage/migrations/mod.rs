use sea_orm_migration::prelude::*;

mod m20240101_000001_create_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_events::Migration)]
    }

    // Modules share one database connection, so each keeps its own
    // tracking table instead of the default shared `seaql_migrations`.
    fn migration_table_name() -> DynIden {
        Alias::new("events_migrations").into_iden()
    }
}
