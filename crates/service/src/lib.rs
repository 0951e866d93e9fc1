//! Service layer: the request-validation-and-mutation core.
//! - Validates and normalises untrusted input before it reaches storage.
//! - Owns credential handling (password hashing, token issuance).
//! - Enforces email uniqueness and the salary floor.
//! - Maps store failures onto a stable, client-facing error taxonomy.

pub mod errors;
pub mod args;
pub mod validation;
pub mod media;
pub mod auth;
pub mod employee;
#[cfg(test)]
pub mod test_support;

pub use errors::{ServiceError, StoreError};
