//! Create `employee` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(uuid(Employee::Id).primary_key())
                    .col(text(Employee::FirstName).not_null())
                    .col(text(Employee::LastName).not_null())
                    .col(text(Employee::Email).not_null())
                    .col(text_null(Employee::Gender))
                    .col(text(Employee::Designation).not_null())
                    .col(text(Employee::Department).not_null())
                    .col(double(Employee::Salary).not_null())
                    .col(date(Employee::DateOfJoining).not_null())
                    .col(text_null(Employee::PhotoUrl))
                    .col(timestamp_with_time_zone(Employee::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employee::UpdatedAt).not_null())
                    .check(Expr::col(Employee::Salary).gte(1000))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Gender,
    Designation,
    Department,
    Salary,
    DateOfJoining,
    PhotoUrl,
    CreatedAt,
    UpdatedAt,
}
