//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Signup and login live here, together with the credential primitives
//! (password hashing and token issuance) they depend on.

pub mod domain;
pub mod credentials;
pub mod repository;
pub mod service;
pub mod repo;

pub use credentials::{CredentialConfig, CredentialService};
pub use service::AccountService;
