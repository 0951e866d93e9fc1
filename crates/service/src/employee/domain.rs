use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee record as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub designation: String,
    pub department: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, normalised fields for a new record.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub designation: String,
    pub department: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub photo_url: Option<String>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<NaiveDate>,
    pub photo_url: Option<String>,
}

impl EmployeePatch {
    /// Apply the supplied fields onto `e`.
    pub fn apply_to(&self, e: &mut Employee) {
        if let Some(v) = &self.first_name { e.first_name = v.clone(); }
        if let Some(v) = &self.last_name { e.last_name = v.clone(); }
        if let Some(v) = &self.email { e.email = v.clone(); }
        if let Some(v) = &self.gender { e.gender = Some(v.clone()); }
        if let Some(v) = &self.designation { e.designation = v.clone(); }
        if let Some(v) = &self.department { e.department = v.clone(); }
        if let Some(v) = self.salary { e.salary = v; }
        if let Some(v) = self.date_of_joining { e.date_of_joining = v; }
        if let Some(v) = &self.photo_url { e.photo_url = Some(v.clone()); }
    }
}

/// Case-insensitive substring filters, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub designation: Option<String>,
    pub department: Option<String>,
}

impl SearchFilter {
    pub fn matches(&self, e: &Employee) -> bool {
        fn contains(hay: &str, needle: &Option<String>) -> bool {
            needle.as_ref().map_or(true, |n| hay.to_lowercase().contains(&n.to_lowercase()))
        }
        contains(&e.designation, &self.designation) && contains(&e.department, &self.department)
    }
}

impl From<models::employee::Model> for Employee {
    fn from(m: models::employee::Model) -> Self {
        Employee {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            gender: m.gender,
            designation: m.designation,
            department: m.department,
            salary: m.salary,
            date_of_joining: m.date_of_joining,
            photo_url: m.photo_url,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}
