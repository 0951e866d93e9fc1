use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Account: unique email (stored lower-cased)
        manager
            .create_index(
                Index::create()
                    .name("uniq_account_email")
                    .table(Account::Table)
                    .col(Account::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Account: username lookups on login
        manager
            .create_index(
                Index::create()
                    .name("idx_account_username")
                    .table(Account::Table)
                    .col(Account::Username)
                    .to_owned(),
            )
            .await?;

        // Employee: unique email (stored lower-cased)
        manager
            .create_index(
                Index::create()
                    .name("uniq_employee_email")
                    .table(Employee::Table)
                    .col(Employee::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Employee: listings are ordered newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_created_at")
                    .table(Employee::Table)
                    .col(Employee::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_account_email").table(Account::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_account_username").table(Account::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_employee_email").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_created_at").table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Account { Table, Email, Username }

#[derive(DeriveIden)]
enum Employee { Table, Email, CreatedAt }
