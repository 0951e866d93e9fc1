use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Employee, EmployeePatch, NewEmployee, SearchFilter};
use crate::errors::StoreError;

/// Store port for employee records.
///
/// Listings are ordered by `created_at` descending. Writes that collide with
/// another record's email fail with [`StoreError::DuplicateKey`] on `"email"`.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, StoreError>;
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Employee>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError>;
    async fn create(&self, input: NewEmployee) -> Result<Employee, StoreError>;
    /// `Ok(None)` when no record has `id`.
    async fn update(&self, id: Uuid, patch: EmployeePatch) -> Result<Option<Employee>, StoreError>;
    /// `Ok(false)` when no record has `id`.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockEmployeeRepository {
        employees: Mutex<Vec<Employee>>, // insertion order == creation order
    }

    impl MockEmployeeRepository {
        fn newest_first(&self, keep: impl Fn(&Employee) -> bool) -> Vec<Employee> {
            let employees = self.employees.lock().unwrap();
            employees.iter().rev().filter(|e| keep(*e)).cloned().collect()
        }
    }

    #[async_trait]
    impl EmployeeRepository for MockEmployeeRepository {
        async fn list(&self) -> Result<Vec<Employee>, StoreError> {
            Ok(self.newest_first(|_| true))
        }

        async fn search(&self, filter: &SearchFilter) -> Result<Vec<Employee>, StoreError> {
            Ok(self.newest_first(|e| filter.matches(e)))
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
            let employees = self.employees.lock().unwrap();
            Ok(employees.iter().find(|e| e.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
            let employees = self.employees.lock().unwrap();
            Ok(employees.iter().find(|e| e.email == email).cloned())
        }

        async fn create(&self, input: NewEmployee) -> Result<Employee, StoreError> {
            let mut employees = self.employees.lock().unwrap();
            if employees.iter().any(|e| e.email == input.email) {
                return Err(StoreError::DuplicateKey { field: "email".into() });
            }
            let now = Utc::now();
            let employee = Employee {
                id: Uuid::new_v4(),
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                gender: input.gender,
                designation: input.designation,
                department: input.department,
                salary: input.salary,
                date_of_joining: input.date_of_joining,
                photo_url: input.photo_url,
                created_at: now,
                updated_at: now,
            };
            employees.push(employee.clone());
            Ok(employee)
        }

        async fn update(&self, id: Uuid, patch: EmployeePatch) -> Result<Option<Employee>, StoreError> {
            let mut employees = self.employees.lock().unwrap();
            if let Some(email) = &patch.email {
                if employees.iter().any(|e| e.id != id && &e.email == email) {
                    return Err(StoreError::DuplicateKey { field: "email".into() });
                }
            }
            let Some(target) = employees.iter_mut().find(|e| e.id == id) else { return Ok(None) };
            patch.apply_to(target);
            target.updated_at = Utc::now();
            Ok(Some(target.clone()))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
            let mut employees = self.employees.lock().unwrap();
            let before = employees.len();
            employees.retain(|e| e.id != id);
            Ok(employees.len() != before)
        }
    }
}
