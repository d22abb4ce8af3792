//! Migration: Create the staff_profiles table.

use sea_orm_migration::prelude::*;

use domain::constants::MAX_PROFILE_FIELD_LENGTH;

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
                    .table(StaffProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffProfiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::AccountId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::EmployeeId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StaffProfiles::Department).string_len(field_len).not_null())
                    .col(ColumnDef::new(StaffProfiles::Position).string_len(field_len).not_null())
                    .col(ColumnDef::new(StaffProfiles::HireDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_profiles_account_id")
                            .from(StaffProfiles::Table, StaffProfiles::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StaffProfiles {
    Table,
    Id,
    AccountId,
    EmployeeId,
    Department,
    Position,
    HireDate,
}
