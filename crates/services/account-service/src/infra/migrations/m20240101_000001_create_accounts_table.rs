//! Migration: Create the accounts table.

use domain::constants::MAX_PHONE_LENGTH;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Accounts::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Accounts::FirstName).string().not_null().default(""))
                    .col(ColumnDef::new(Accounts::LastName).string().not_null().default(""))
                    .col(ColumnDef::new(Accounts::Role).string_len(20).not_null().default("guest"))
                    .col(
                        ColumnDef::new(Accounts::Phone)
                            .string_len(MAX_PHONE_LENGTH as u32)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Accounts::Address).text().not_null().default(""))
                    .col(ColumnDef::new(Accounts::ProfilePicture).string().null())
                    .col(ColumnDef::new(Accounts::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Accounts::IsStaff).boolean().not_null().default(false))
                    .col(ColumnDef::new(Accounts::IsSuperuser).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Accounts::DateJoined)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_role")
                    .table(Accounts::Table)
                    .col(Accounts::Role)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Accounts {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Role,
    Phone,
    Address,
    ProfilePicture,
    IsActive,
    IsStaff,
    IsSuperuser,
    DateJoined,
}
