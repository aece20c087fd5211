pub use sea_orm_migration::prelude::*;

mod m20250914_000001_create_user_table;
mod m20250914_000002_create_keep_signed_table;
mod m20250914_000003_create_request_token_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250914_000001_create_user_table::Migration),
            Box::new(m20250914_000002_create_keep_signed_table::Migration),
            Box::new(m20250914_000003_create_request_token_table::Migration),
        ]
    }
}
