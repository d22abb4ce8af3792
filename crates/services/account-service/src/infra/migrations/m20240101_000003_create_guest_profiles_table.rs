//! Migration: Create the guest_profiles table.

use domain::constants::MAX_PROFILE_FIELD_LENGTH;
use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts_table::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let field_len = MAX_PROFILE_FIELD_LENGTH as u32;

        manager
            .create_table(
                Table::create()
                    .table(GuestProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GuestProfiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GuestProfiles::AccountId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(GuestProfiles::Nationality)
                            .string_len(field_len)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(GuestProfiles::PassportNumber)
                            .string_len(field_len)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(GuestProfiles::IdNumber)
                            .string_len(field_len)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(GuestProfiles::DateOfBirth).date().null())
                    .col(
                        ColumnDef::new(GuestProfiles::Preferences)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guest_profiles_account_id")
                            .from(GuestProfiles::Table, GuestProfiles::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuestProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GuestProfiles {
    Table,
    Id,
    AccountId,
    Nationality,
    PassportNumber,
    IdNumber,
    DateOfBirth,
    Preferences,
}
