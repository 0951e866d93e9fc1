//! Entity round-trips against a live Postgres.
//! Skipped unless `DATABASE_URL` points at a reachable database.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use migration::MigratorTrait;
use models::{account, db, employee};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || db::database_url().is_none() {
        return None;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[tokio::test]
async fn account_insert_and_lookup() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let now = Utc::now().into();
    let email = format!("acct_{}@example.com", Uuid::new_v4());
    let created = account::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set("tester".into()),
        email: Set(email.clone()),
        password_hash: Set("$argon2id$placeholder".into()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await?;

    let found = account::Entity::find()
        .filter(account::Column::Email.eq(email.clone()))
        .one(&db)
        .await?
        .expect("account by email");
    assert_eq!(found.id, created.id);

    // The serialized form never carries the hash.
    let json = serde_json::to_value(&found)?;
    assert!(json.get("password_hash").is_none());

    account::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn employee_email_is_unique() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let email = format!("emp_{}@example.com", Uuid::new_v4());
    let make = |email: String| {
        let now = Utc::now().into();
        employee::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set("Ada".into()),
            last_name: Set("Lovelace".into()),
            email: Set(email),
            gender: Set(None),
            designation: Set("Engineer".into()),
            department: Set("R&D".into()),
            salary: Set(5000.0),
            date_of_joining: Set(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            photo_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
    };

    let first = make(email.clone()).insert(&db).await?;
    let second = make(email.clone()).insert(&db).await;
    let err = second.expect_err("duplicate email must be rejected");
    assert!(matches!(err.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))));

    employee::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}
