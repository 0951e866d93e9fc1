use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::credentials::CredentialService;
use super::domain::{Account, NewAccount};
use super::repository::AccountRepository;
use crate::args::{self, Args};
use crate::errors::ServiceError;
use crate::validation::{validate, Operation};

/// Signup/login orchestration independent of web framework
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
    credentials: Arc<CredentialService>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepository>, credentials: Arc<CredentialService>) -> Self {
        Self { repo, credentials }
    }

    /// Register a new account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AccountService, CredentialConfig, CredentialService};
    /// use service::auth::repository::mock::MockAccountRepository;
    /// use std::sync::Arc;
    /// let creds = CredentialService::new(CredentialConfig { hash_memory_kib: 1024, hash_iterations: 1, ..Default::default() }).unwrap();
    /// let svc = AccountService::new(Arc::new(MockAccountRepository::default()), Arc::new(creds));
    /// let args = service::args::from_json(serde_json::json!({"username": "ada", "email": "Ada@Example.com", "password": "secret1"}));
    /// let account = tokio_test::block_on(svc.signup(&args)).unwrap();
    /// assert_eq!(account.email, "ada@example.com");
    /// ```
    #[instrument(skip_all, fields(username = ?args::text(input, "username")))]
    pub async fn signup(&self, input: &Args) -> Result<Account, ServiceError> {
        validate(Operation::Signup, input)?;
        let username = args::text(input, "username").unwrap_or_default();
        let email = args::email(input, "email").unwrap_or_default();
        let password = args::present(input, "password").and_then(|v| v.as_str()).unwrap_or_default();

        if let Some(existing) = self.repo.find_by_email(&email).await? {
            debug!(account_id = %existing.account.id, "email already registered");
            return Err(ServiceError::email_exists());
        }

        let password_hash = self.credentials.hash(password).await?;
        let account = match self.repo.create(NewAccount { username, email, password_hash }).await {
            Ok(a) => a,
            Err(e) if e.is_duplicate_key("email") => {
                warn!("duplicate email caught by store constraint");
                return Err(ServiceError::email_exists());
            }
            Err(e) => return Err(e.into()),
        };
        info!(account_id = %account.id, email = %account.email, "account_created");
        Ok(account)
    }

    /// Authenticate by username (verbatim) or email (case-insensitive) and issue a token.
    #[instrument(skip_all)]
    pub async fn login(&self, input: &Args) -> Result<String, ServiceError> {
        validate(Operation::Login, input)?;
        let username = args::present(input, "username")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty());
        let email = args::email(input, "email");
        let password = args::present(input, "password").and_then(|v| v.as_str()).unwrap_or_default();

        let found = match (username, email) {
            (Some(username), _) => self.repo.find_by_username(username).await?,
            (None, Some(email)) => self.repo.find_by_email(&email).await?,
            (None, None) => return Err(ServiceError::invalid("Username or email is required")),
        };

        let Some(record) = found else {
            warn!("login_rejected");
            return Err(ServiceError::Unauthenticated);
        };
        if !self.credentials.verify(password, &record.password_hash).await? {
            warn!(account_id = %record.account.id, "login_rejected");
            return Err(ServiceError::Unauthenticated);
        }

        let token = self.credentials.issue_token(&record.account)?;
        info!(account_id = %record.account.id, "login_succeeded");
        Ok(token)
    }
}
