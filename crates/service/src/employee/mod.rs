//! Employee directory: CRUD and search over personnel records.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{EmployeeDirectory, EMPLOYEE_DELETED};
