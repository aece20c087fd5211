use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KeepSignedToken::Table)
                    .col(
                        ColumnDef::new(KeepSignedToken::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(KeepSignedToken::UserId)
                            .uuid()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(KeepSignedToken::SecretHash)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(KeepSignedToken::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(KeepSignedToken::ValidUntil)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .to_owned()
            )
            .await?;

        // purge runs filter on valid_until, lookups come in by user on revocation sweeps
        manager
            .create_index(
                Index::create()
                    .name("idx_keep_signed_valid_until")
                    .table(KeepSignedToken::Table)
                    .col(KeepSignedToken::ValidUntil)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_keep_signed_user")
                    .table(KeepSignedToken::Table)
                    .col(KeepSignedToken::UserId)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(KeepSignedToken::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum KeepSignedToken {
    Table,
    Id,
    UserId,
    SecretHash,
    CreatedAt,
    ValidUntil,
}
