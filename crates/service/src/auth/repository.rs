use async_trait::async_trait;

use super::domain::{Account, AccountRecord, NewAccount};
use crate::errors::StoreError;

/// Repository abstraction for account persistence.
///
/// `create` must report a unique-email violation as
/// [`StoreError::DuplicateKey`] with field `"email"`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, StoreError>;
    async fn create(&self, input: NewAccount) -> Result<Account, StoreError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAccountRepository {
        accounts: Mutex<Vec<AccountRecord>>, // insertion order
    }

    impl MockAccountRepository {
        pub fn len(&self) -> usize {
            self.accounts.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StoreError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.iter().find(|a| a.account.email == email).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, StoreError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.iter().find(|a| a.account.username == username).cloned())
        }

        async fn create(&self, input: NewAccount) -> Result<Account, StoreError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.iter().any(|a| a.account.email == input.email) {
                return Err(StoreError::DuplicateKey { field: "email".into() });
            }
            let account = Account { id: Uuid::new_v4(), username: input.username, email: input.email, created_at: Utc::now() };
            accounts.push(AccountRecord { account: account.clone(), password_hash: input.password_hash });
            Ok(account)
        }
    }
}
