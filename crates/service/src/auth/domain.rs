use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account as returned to callers; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Stored account including its hash; only the auth layer sees this.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub account: Account,
    pub password_hash: String,
}

/// Signup input after validation and normalisation.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Claims embedded in issued bearer tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<models::account::Model> for AccountRecord {
    fn from(m: models::account::Model) -> Self {
        AccountRecord {
            account: Account {
                id: m.id,
                username: m.username,
                email: m.email,
                created_at: m.created_at.with_timezone(&Utc),
            },
            password_hash: m.password_hash,
        }
    }
}
