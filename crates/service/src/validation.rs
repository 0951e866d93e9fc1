//! Per-operation input rules.
//!
//! Each operation maps to an ordered table of field rules. Every field is
//! checked eagerly; a field stops at its first failing check so the result
//! carries at most one message per field, in table order.

use serde_json::Value;
use validator::ValidateEmail;

use crate::args::{self, Args};
use crate::errors::ServiceError;

pub const MIN_SALARY: f64 = 1000.0;

/// Operations that carry validated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Signup,
    AddEmployee,
    UpdateEmployee,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Signup => "signup",
            Operation::AddEmployee => "addEmployee",
            Operation::UpdateEmployee => "updateEmployee",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    Text,
    NotBlank,
    /// Length after trimming, for values stored trimmed.
    MinLength(usize),
    /// Length as submitted, for values used verbatim (passwords).
    MinRawLength(usize),
    Email,
    NumberAtLeast(f64),
    CalendarDate,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub presence: Presence,
    pub checks: &'static [Check],
}

const fn required(field: &'static str, checks: &'static [Check]) -> FieldRule {
    FieldRule { field, presence: Presence::Required, checks }
}

const fn optional(field: &'static str, checks: &'static [Check]) -> FieldRule {
    FieldRule { field, presence: Presence::Optional, checks }
}

const LOGIN: &[FieldRule] = &[
    optional("username", &[Check::Text]),
    optional("email", &[Check::Text]),
    required("password", &[Check::Text, Check::MinRawLength(6)]),
];

const SIGNUP: &[FieldRule] = &[
    required("username", &[Check::Text, Check::MinLength(3)]),
    required("email", &[Check::Text, Check::Email]),
    required("password", &[Check::Text, Check::MinRawLength(6)]),
];

const ADD_EMPLOYEE: &[FieldRule] = &[
    required("first_name", &[Check::Text]),
    required("last_name", &[Check::Text]),
    required("email", &[Check::Text, Check::Email]),
    optional("gender", &[Check::Text]),
    required("designation", &[Check::Text]),
    required("salary", &[Check::NumberAtLeast(MIN_SALARY)]),
    required("date_of_joining", &[Check::Text, Check::CalendarDate]),
    required("department", &[Check::Text]),
    optional("employee_photo", &[Check::Text]),
];

const UPDATE_EMPLOYEE: &[FieldRule] = &[
    required("eid", &[Check::Text]),
    optional("first_name", &[Check::Text, Check::NotBlank]),
    optional("last_name", &[Check::Text, Check::NotBlank]),
    optional("email", &[Check::Text, Check::Email]),
    optional("gender", &[Check::Text]),
    optional("designation", &[Check::Text, Check::NotBlank]),
    optional("salary", &[Check::NumberAtLeast(MIN_SALARY)]),
    optional("date_of_joining", &[Check::Text, Check::CalendarDate]),
    optional("department", &[Check::Text, Check::NotBlank]),
    optional("employee_photo", &[Check::Text]),
];

/// The rule table for `op`.
pub fn rules(op: Operation) -> &'static [FieldRule] {
    match op {
        Operation::Login => LOGIN,
        Operation::Signup => SIGNUP,
        Operation::AddEmployee => ADD_EMPLOYEE,
        Operation::UpdateEmployee => UPDATE_EMPLOYEE,
    }
}

/// All violations found for one operation, in rule order.
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(pub Vec<String>);

impl Violations {
    pub fn first(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or("Invalid input")
    }
}

impl From<Violations> for ServiceError {
    fn from(v: Violations) -> Self {
        ServiceError::InvalidInput { message: v.first().to_string(), details: v.0 }
    }
}

/// Apply the rule table for `op` to `input`.
pub fn validate(op: Operation, input: &Args) -> Result<(), Violations> {
    let violations: Vec<String> = rules(op)
        .iter()
        .filter_map(|rule| check_field(rule, input))
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!(operation = op.name(), count = violations.len(), "input rejected");
        Err(Violations(violations))
    }
}

fn check_field(rule: &FieldRule, input: &Args) -> Option<String> {
    let field = rule.field;
    let value = match args::present(input, field) {
        Some(v) => v,
        None if rule.presence == Presence::Required => return Some(format!("{} is required", field)),
        None => return None,
    };
    // Blank text counts as missing for required fields.
    if rule.presence == Presence::Required && is_blank(value) {
        return Some(format!("{} is required", field));
    }
    rule.checks.iter().find_map(|check| apply(*check, field, value))
}

fn is_blank(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

fn apply(check: Check, field: &str, value: &Value) -> Option<String> {
    let ok = match check {
        Check::Text => value.is_string(),
        Check::NotBlank => !is_blank(value),
        Check::MinLength(min) => value.as_str().is_some_and(|s| s.trim().chars().count() >= min),
        Check::MinRawLength(min) => value.as_str().is_some_and(|s| s.chars().count() >= min),
        Check::Email => value.as_str().is_some_and(|s| s.trim().validate_email()),
        Check::NumberAtLeast(min) => match args::number(value) {
            None => return Some(format!("{} must be a number", field)),
            Some(n) => n >= min,
        },
        Check::CalendarDate => value.as_str().and_then(args::calendar_date).is_some(),
    };
    if ok {
        return None;
    }
    Some(match check {
        Check::Text => format!("{} must be a string", field),
        Check::NotBlank => format!("{} cannot be empty", field),
        Check::MinLength(min) | Check::MinRawLength(min) => {
            format!("{} must be at least {} characters", field, min)
        }
        Check::Email => format!("{} must be a valid email address", field),
        Check::NumberAtLeast(min) => format!("{} must be at least {}", field, min),
        Check::CalendarDate => format!("{} must be a valid date (YYYY-MM-DD)", field),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::from_json;
    use serde_json::json;

    fn employee() -> Args {
        from_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "designation": "Engineer",
            "salary": 5000,
            "date_of_joining": "2024-01-15",
            "department": "Engineering"
        }))
    }

    #[test]
    fn complete_employee_passes() {
        assert_eq!(validate(Operation::AddEmployee, &employee()), Ok(()));
    }

    #[test]
    fn salary_floor_is_inclusive() {
        let mut a = employee();
        a.insert("salary".into(), json!(1000));
        assert!(validate(Operation::AddEmployee, &a).is_ok());
        a.insert("salary".into(), json!(999.99));
        let v = validate(Operation::AddEmployee, &a).unwrap_err();
        assert_eq!(v.first(), "salary must be at least 1000");
    }

    #[test]
    fn non_numeric_salary_rejected() {
        let mut a = employee();
        a.insert("salary".into(), json!("lots"));
        let v = validate(Operation::AddEmployee, &a).unwrap_err();
        assert_eq!(v.0, vec!["salary must be a number".to_string()]);
    }

    #[test]
    fn all_violations_are_collected_in_rule_order() {
        let a = from_json(json!({"email": "nope", "salary": 10, "employee_photo": 42}));
        let v = validate(Operation::AddEmployee, &a).unwrap_err();
        assert_eq!(v.first(), "first_name is required");
        assert_eq!(
            v.0,
            vec![
                "first_name is required",
                "last_name is required",
                "email must be a valid email address",
                "designation is required",
                "salary must be at least 1000",
                "date_of_joining is required",
                "department is required",
                "employee_photo must be a string",
            ]
        );
    }

    #[test]
    fn blank_required_text_is_missing() {
        let mut a = employee();
        a.insert("first_name".into(), json!("   "));
        let v = validate(Operation::AddEmployee, &a).unwrap_err();
        assert_eq!(v.first(), "first_name is required");
    }

    #[test]
    fn bad_date_rejected() {
        let mut a = employee();
        a.insert("date_of_joining".into(), json!("2024-13-01"));
        let v = validate(Operation::AddEmployee, &a).unwrap_err();
        assert_eq!(v.first(), "date_of_joining must be a valid date (YYYY-MM-DD)");
    }

    #[test]
    fn signup_rules() {
        let ok = from_json(json!({"username": "bob", "email": "b@x.io", "password": "secret"}));
        assert!(validate(Operation::Signup, &ok).is_ok());

        let bad = from_json(json!({"username": "bo", "email": "bob", "password": "12345"}));
        let v = validate(Operation::Signup, &bad).unwrap_err();
        assert_eq!(
            v.0,
            vec![
                "username must be at least 3 characters",
                "email must be a valid email address",
                "password must be at least 6 characters",
            ]
        );
    }

    #[test]
    fn login_only_requires_password() {
        let a = from_json(json!({"password": "secret"}));
        assert!(validate(Operation::Login, &a).is_ok());
        let v = validate(Operation::Login, &Args::new()).unwrap_err();
        assert_eq!(v.0, vec!["password is required".to_string()]);
    }

    #[test]
    fn update_checks_only_supplied_fields() {
        let a = from_json(json!({"eid": "abc"}));
        assert!(validate(Operation::UpdateEmployee, &a).is_ok());

        let a = from_json(json!({"eid": "abc", "salary": 500, "email": "x"}));
        let v = validate(Operation::UpdateEmployee, &a).unwrap_err();
        assert_eq!(v.first(), "email must be a valid email address");
        assert_eq!(v.0.len(), 2);

        let a = from_json(json!({"eid": "abc", "designation": ""}));
        let v = validate(Operation::UpdateEmployee, &a).unwrap_err();
        assert_eq!(v.first(), "designation cannot be empty");

        let v = validate(Operation::UpdateEmployee, &Args::new()).unwrap_err();
        assert_eq!(v.first(), "eid is required");
    }

    #[test]
    fn password_length_counts_edge_blanks() {
        let a = from_json(json!({"username": "bob", "email": "b@x.io", "password": "  abcd  "}));
        assert!(validate(Operation::Signup, &a).is_ok());
        let a = from_json(json!({"username": "  bo  ", "email": "b@x.io", "password": "secret"}));
        let v = validate(Operation::Signup, &a).unwrap_err();
        assert_eq!(v.first(), "username must be at least 3 characters");
    }

    #[test]
    fn violations_become_invalid_input() {
        let v = validate(Operation::Login, &Args::new()).unwrap_err();
        let e: ServiceError = v.into();
        assert_eq!(e.code(), "INVALID_INPUT");
        assert_eq!(e.to_string(), "password is required");
        assert_eq!(e.details(), vec!["password is required".to_string()]);
    }
}
