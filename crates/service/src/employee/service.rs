use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{Employee, EmployeePatch, NewEmployee, SearchFilter};
use super::repository::EmployeeRepository;
use crate::args::{self, Args};
use crate::errors::{ServiceError, StoreError};
use crate::media::PhotoUploader;
use crate::validation::{validate, Operation};

/// Confirmation returned by a successful delete.
pub const EMPLOYEE_DELETED: &str = "Employee deleted successfully";

/// Application service encapsulating employee business rules.
/// Handles validation, email uniqueness and photo upload ahead of the store.
pub struct EmployeeDirectory {
    repo: Arc<dyn EmployeeRepository>,
    photos: Arc<PhotoUploader>,
}

impl EmployeeDirectory {
    pub fn new(repo: Arc<dyn EmployeeRepository>, photos: Arc<PhotoUploader>) -> Self {
        Self { repo, photos }
    }

    /// All employees, newest first.
    pub async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.repo.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Employee, ServiceError> {
        let id = parse_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Employee"))
    }

    /// Case-insensitive substring search; at least one filter is required.
    #[instrument(skip(self))]
    pub async fn search(&self, designation: Option<&str>, department: Option<&str>) -> Result<Vec<Employee>, ServiceError> {
        let clean = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        let filter = SearchFilter { designation: clean(designation), department: clean(department) };
        if filter.designation.is_none() && filter.department.is_none() {
            return Err(ServiceError::invalid("Provide designation or department to search"));
        }
        let found = self.repo.search(&filter).await?;
        debug!(count = found.len(), "employee search");
        Ok(found)
    }

    #[instrument(skip_all, fields(email = ?args::email(input, "email")))]
    pub async fn create(&self, input: &Args) -> Result<Employee, ServiceError> {
        validate(Operation::AddEmployee, input)?;
        let email = required_text(input, "email")?.to_lowercase();

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::email_exists());
        }

        let photo_url = self.photos.upload(photo_payload(input)).await?;
        let new = NewEmployee {
            first_name: required_text(input, "first_name")?,
            last_name: required_text(input, "last_name")?,
            email,
            gender: args::text(input, "gender"),
            designation: required_text(input, "designation")?,
            department: required_text(input, "department")?,
            salary: salary(input).ok_or_else(|| ServiceError::invalid("salary is required"))?,
            date_of_joining: joining_date(input).ok_or_else(|| ServiceError::invalid("date_of_joining is required"))?,
            photo_url,
        };

        let created = self.repo.create(new).await.map_err(remap_duplicate_email)?;
        info!(employee_id = %created.id, "employee_created");
        Ok(created)
    }

    /// Partial update: only supplied fields change.
    #[instrument(skip_all, fields(eid = ?args::text(input, "eid")))]
    pub async fn update(&self, input: &Args) -> Result<Employee, ServiceError> {
        validate(Operation::UpdateEmployee, input)?;
        let id = parse_id(&required_text(input, "eid")?)?;

        let mut patch = EmployeePatch {
            first_name: args::text(input, "first_name"),
            last_name: args::text(input, "last_name"),
            email: args::email(input, "email"),
            gender: args::text(input, "gender"),
            designation: args::text(input, "designation"),
            department: args::text(input, "department"),
            salary: salary(input),
            date_of_joining: joining_date(input),
            photo_url: None,
        };

        if let Some(email) = &patch.email {
            if let Some(other) = self.repo.find_by_email(email).await? {
                if other.id != id {
                    return Err(ServiceError::email_exists());
                }
            }
        }

        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("Employee"));
        }

        patch.photo_url = self.photos.upload(photo_payload(input)).await?;

        match self.repo.update(id, patch).await {
            Ok(Some(updated)) => {
                info!(employee_id = %updated.id, "employee_updated");
                Ok(updated)
            }
            Ok(None) => Err(ServiceError::not_found("Employee")),
            Err(e) => Err(remap_duplicate_email(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, eid: &str) -> Result<String, ServiceError> {
        let id = parse_id(eid)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Employee"));
        }
        info!(employee_id = %id, "employee_deleted");
        Ok(EMPLOYEE_DELETED.to_string())
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::invalid("Invalid employee id"))
}

fn required_text(input: &Args, key: &str) -> Result<String, ServiceError> {
    args::text(input, key).ok_or_else(|| ServiceError::invalid(format!("{} is required", key)))
}

fn salary(input: &Args) -> Option<f64> {
    args::present(input, "salary").and_then(args::number)
}

fn joining_date(input: &Args) -> Option<chrono::NaiveDate> {
    args::present(input, "date_of_joining")
        .and_then(|v| v.as_str())
        .and_then(args::calendar_date)
}

fn photo_payload(input: &Args) -> Option<&str> {
    args::present(input, "employee_photo").and_then(|v| v.as_str())
}

/// Store-level email collisions read the same as the pre-check.
fn remap_duplicate_email(e: StoreError) -> ServiceError {
    if e.is_duplicate_key("email") {
        warn!("duplicate email caught by store constraint");
        ServiceError::email_exists()
    } else {
        e.into()
    }
}
