use std::collections::HashMap;
use std::str::FromStr;

use uuid::Uuid;

use crate::db::models::api::ErrorDetail;
use crate::db::models::employee::EmployeeForm;
use crate::error::AppError;

use super::validation_errors;

/// Builds an [`EmployeeForm`] from submitted text fields and runs its rules.
///
/// Empty optional fields (`department_id`, `manager_id`, `password`) count as
/// absent, the way an HTML form submits an unselected option.
pub fn parse_employee_form(mut fields: HashMap<String, String>) -> Result<EmployeeForm, AppError> {
    let mut errors = Vec::new();

    let mut take = |name: &str| fields.remove(name).unwrap_or_default();
    let first_name = take("first_name");
    let last_name = take("last_name");
    let email = take("email");
    let phone = take("phone");
    let salary = take("salary");
    let department_id = take("department_id");
    let manager_id = take("manager_id");
    let password = take("password");
    let password_confirmation = take("password_confirmation");

    let salary = match salary.trim() {
        "" => {
            errors.push(ErrorDetail::field("salary", "required", "Salary is required"));
            0
        }
        raw => i32::from_str(raw).unwrap_or_else(|_| {
            errors.push(ErrorDetail::field("salary", "integer", "Salary must be an integer"));
            0
        }),
    };

    let department_id = optional_uuid("department_id", &department_id, &mut errors);
    let manager_id = optional_uuid("manager_id", &manager_id, &mut errors);

    if !errors.is_empty() {
        return Err(AppError::InvalidInput { errors });
    }

    let form = EmployeeForm {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        email: email.trim().to_string(),
        phone: phone.trim().to_string(),
        salary,
        department_id,
        manager_id,
        password: non_empty(password),
        password_confirmation: non_empty(password_confirmation),
    };

    form.check().map_err(validation_errors)?;
    Ok(form)
}

/// A new employee must be given a password.
pub fn require_password(form: &EmployeeForm) -> Result<&str, AppError> {
    form.password
        .as_deref()
        .ok_or_else(|| AppError::invalid_field("password", "required", "Password is required"))
}

fn optional_uuid(field: &str, raw: &str, errors: &mut Vec<ErrorDetail>) -> Option<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(ErrorDetail::field(field, "uuid", format!("The {} is invalid", field)));
            None
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
