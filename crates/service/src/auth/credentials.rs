use std::time::Duration;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use rand::rngs::OsRng;

use super::domain::{Account, Claims};
use crate::errors::ServiceError;

/// Credential settings, built once at startup.
#[derive(Clone, Debug)]
pub struct CredentialConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl: Duration,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl: Duration::from_secs(24 * 60 * 60),
            hash_memory_kib: Params::DEFAULT_M_COST,
            hash_iterations: Params::DEFAULT_T_COST,
            hash_parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password hashing (argon2id) and bearer-token issuance (HS256 JWT).
pub struct CredentialService {
    cfg: CredentialConfig,
    params: Params,
}

impl CredentialService {
    pub fn new(cfg: CredentialConfig) -> Result<Self, ServiceError> {
        let params = Params::new(cfg.hash_memory_kib, cfg.hash_iterations, cfg.hash_parallelism, None)
            .map_err(|e| ServiceError::internal("Invalid password hashing parameters", Some(e.to_string())))?;
        Ok(Self { cfg, params })
    }

    fn hasher(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }

    /// Salted one-way hash in PHC string form. Runs on the blocking pool.
    pub async fn hash(&self, password: &str) -> Result<String, ServiceError> {
        let password = password.to_owned();
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::hasher(params)
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| ServiceError::internal("Password hashing failed", Some(e.to_string())))
        })
        .await
        .map_err(|e| ServiceError::internal("Password hashing failed", Some(e.to_string())))?
    }

    /// Check `password` against a stored PHC hash. Parameters come from the hash itself.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hash)
                .map_err(|e| ServiceError::internal("Stored password hash is malformed", Some(e.to_string())))?;
            Ok(Self::hasher(params).verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|e| ServiceError::internal("Password verification failed", Some(e.to_string())))?
    }

    /// Sign a time-limited token for `account`.
    pub fn issue_token(&self, account: &Account) -> Result<String, ServiceError> {
        let secret = self.cfg.jwt_secret.as_deref().ok_or_else(|| {
            ServiceError::internal("Token signing is not configured", Some("JWT secret is missing".into()))
        })?;
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            email: account.email.clone(),
            iat: now,
            exp: now + self.cfg.token_ttl.as_secs() as i64,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| ServiceError::internal("Token signing failed", Some(e.to_string())))
    }
}

#[cfg(test)]
pub(crate) fn test_config(secret: Option<&str>) -> CredentialConfig {
    CredentialConfig {
        jwt_secret: secret.map(String::from),
        hash_memory_kib: 1024,
        hash_iterations: 1,
        ..CredentialConfig::default()
    }
}
