use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RequestToken::Table)
                    .col(
                        ColumnDef::new(RequestToken::Id)
                            .string()
                            .not_null()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(RequestToken::UserId)
                            .uuid()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(RequestToken::Purpose)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(RequestToken::SecretHash)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(RequestToken::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(RequestToken::ValidUntil)
                            .timestamp_with_time_zone()
                    )
                    .to_owned()
            )
            .await?;

        // issuing a fresh token sweeps the same (user, purpose) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_request_token_user_purpose")
                    .table(RequestToken::Table)
                    .col(RequestToken::UserId)
                    .col(RequestToken::Purpose)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(RequestToken::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum RequestToken {
    Table,
    Id,
    UserId,
    Purpose,
    SecretHash,
    CreatedAt,
    ValidUntil,
}
