//! Persistence entities for the employee directory.
//!
//! Emails are stored lower-cased; uniqueness is enforced by the
//! `uniq_account_email` / `uniq_employee_email` indexes.

pub mod db;
pub mod account;
pub mod employee;
