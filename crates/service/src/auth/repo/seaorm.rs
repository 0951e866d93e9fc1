use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::auth::domain::{Account, AccountRecord, NewAccount};
use crate::auth::repository::AccountRepository;
use crate::errors::StoreError;
use models::account;

pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StoreError> {
        let res = account::Entity::find()
            .filter(account::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await?;
        Ok(res.map(AccountRecord::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, StoreError> {
        // usernames are not unique; the oldest account wins
        let res = account::Entity::find()
            .filter(account::Column::Username.eq(username.to_string()))
            .order_by_asc(account::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(res.map(AccountRecord::from))
    }

    async fn create(&self, input: NewAccount) -> Result<Account, StoreError> {
        let now = Utc::now().into();
        let am = account::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&self.db).await?;
        Ok(AccountRecord::from(created).account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn account_repository_roundtrip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmAccountRepository { db: db.clone() };

        let email = format!("svc_{}@example.com", Uuid::new_v4());
        let created = repo
            .create(NewAccount { username: "svc_user".into(), email: email.clone(), password_hash: "$argon2id$x".into() })
            .await?;
        let found = repo.find_by_email(&email).await?.expect("by email");
        assert_eq!(found.account.id, created.id);
        assert_eq!(found.password_hash, "$argon2id$x");

        let dup = repo
            .create(NewAccount { username: "svc_user2".into(), email: email.clone(), password_hash: "h".into() })
            .await
            .unwrap_err();
        assert!(dup.is_duplicate_key("email"));

        account::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn long_username_is_stored_intact() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmAccountRepository { db: db.clone() };

        let username = "u".repeat(200);
        let created = repo
            .create(NewAccount {
                username: username.clone(),
                email: format!("long_{}@example.com", Uuid::new_v4()),
                password_hash: "$argon2id$x".into(),
            })
            .await?;
        assert_eq!(created.username, username);

        account::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }
}
