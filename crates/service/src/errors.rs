use thiserror::Error;

/// Message used for every duplicate-email rejection, whether caught by the
/// pre-check or by the store's unique index.
pub const EMAIL_EXISTS: &str = "Email already exists";

/// Generic login failure; never says which credential was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Client-facing error taxonomy shared by every operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    InvalidInput { message: String, details: Vec<String> },
    #[error("Invalid credentials")]
    Unauthenticated,
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Internal { message: String, detail: Option<String> },
}

impl ServiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into(), details: Vec::new() }
    }

    pub fn email_exists() -> Self { Self::invalid(EMAIL_EXISTS) }

    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn internal(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::Internal { message: message.into(), detail }
    }

    /// Stable code for external mapping/logging
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput { .. } => "INVALID_INPUT",
            ServiceError::Unauthenticated => "UNAUTHENTICATED",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Structured detail list attached to the error, if any.
    pub fn details(&self) -> Vec<String> {
        match self {
            ServiceError::InvalidInput { details, .. } => details.clone(),
            ServiceError::Internal { detail: Some(d), .. } => vec![d.clone()],
            _ => Vec::new(),
        }
    }
}

/// Unmapped store failures surface as internal errors carrying the native message.
impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::internal("Storage operation failed", Some(e.to_string()))
    }
}

/// Failure reported by a store adapter.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("duplicate key on `{field}`")]
    DuplicateKey { field: String },
    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether the write was rejected by a uniqueness constraint on `field`.
    pub fn is_duplicate_key(&self, field: &str) -> bool {
        matches!(self, StoreError::DuplicateKey { field: f } if f == field)
    }
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                let field = if msg.contains("email") { "email" } else { "unknown" };
                StoreError::DuplicateKey { field: field.to_string() }
            }
            _ => StoreError::Backend(e.to_string()),
        }
    }
}
