use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::employee::{Employee, EmployeeChanges, EmployeeForm, NewEmployee},
    db::repositories::{DepartmentRepo, EmployeeRepo},
    error::AppError,
    services::accounts_service::hash_password,
    storage::{ImageStorage, ImageUpload},
    validation::employee::require_password,
};

pub struct EmployeesService;

impl EmployeesService {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<Employee>, AppError> {
        Ok(EmployeeRepo::list_reports(conn)?)
    }

    pub fn search(conn: &mut PgConnection, term: &str) -> Result<Vec<Employee>, AppError> {
        Ok(EmployeeRepo::search(conn, term)?)
    }

    pub fn show(conn: &mut PgConnection, employee_id: Uuid) -> Result<Employee, AppError> {
        EmployeeRepo::find_by_id(conn, employee_id)?.ok_or_else(|| AppError::not_found("Employee"))
    }

    /// Creates the employee, storing `image` first. A failed insert removes
    /// the stored image again.
    pub async fn create(
        conn: &mut PgConnection,
        images: &ImageStorage,
        form: EmployeeForm,
        image: Option<ImageUpload>,
        bcrypt_cost: u32,
    ) -> Result<Employee, AppError> {
        let password = require_password(&form)?.to_string();
        if let Some(upload) = image.as_ref() {
            images.validate(upload)?;
        }
        Self::check_references(conn, &form, None)?;

        let password_hash = hash_password(password, bcrypt_cost).await?;

        let employee = images
            .attach(image.as_ref(), |filename| {
                let new_employee = NewEmployee {
                    role: form.role(),
                    first_name: form.first_name,
                    last_name: form.last_name,
                    email: form.email,
                    phone: form.phone,
                    salary: form.salary,
                    department_id: form.department_id,
                    manager_id: form.manager_id,
                    image: filename,
                    password_hash,
                };
                Ok(EmployeeRepo::insert(conn, &new_employee)?)
            })
            .await?;

        tracing::info!(employee_id = %employee.id, has_image = employee.image.is_some(), "Employee created");
        Ok(employee)
    }

    /// Replaces the employee's fields. A new image is written before the row
    /// update and the previous image is only deleted once the update succeeded.
    pub async fn update(
        conn: &mut PgConnection,
        images: &ImageStorage,
        employee_id: Uuid,
        form: EmployeeForm,
        image: Option<ImageUpload>,
        bcrypt_cost: u32,
    ) -> Result<Employee, AppError> {
        let existing = Self::show(conn, employee_id)?;
        if let Some(upload) = image.as_ref() {
            images.validate(upload)?;
        }
        Self::check_references(conn, &form, Some(&existing))?;

        let password_hash = match form.password.clone() {
            Some(password) => Some(hash_password(password, bcrypt_cost).await?),
            None => None,
        };

        let employee = images
            .replace(existing.image.as_deref(), image.as_ref(), |filename| {
                let changes = EmployeeChanges {
                    role: form.role(),
                    first_name: form.first_name,
                    last_name: form.last_name,
                    email: form.email,
                    phone: form.phone,
                    salary: form.salary,
                    department_id: Some(form.department_id),
                    manager_id: Some(form.manager_id),
                    image: filename,
                    password_hash,
                    updated_at: chrono::Utc::now().naive_utc(),
                };
                Ok(EmployeeRepo::update(conn, employee_id, &changes)?)
            })
            .await?;

        tracing::info!(employee_id = %employee.id, "Employee updated");
        Ok(employee)
    }

    /// Deletes the row, then the image blob on a best-effort basis.
    pub async fn delete(
        conn: &mut PgConnection,
        images: &ImageStorage,
        employee_id: Uuid,
    ) -> Result<Employee, AppError> {
        let existing = Self::show(conn, employee_id)?;

        if EmployeeRepo::has_direct_reports(conn, employee_id)? {
            return Err(AppError::conflict_with_code(
                "Employee cannot be deleted while other employees report to them.",
                None,
                error_codes::RECORD_IN_USE,
            ));
        }

        EmployeeRepo::delete_by_id(conn, employee_id)?;
        images.remove(existing.image.as_deref()).await;

        tracing::info!(employee_id = %employee_id, "Employee deleted");
        Ok(existing)
    }

    /// Store-backed rules: unique email, existing department, and a manager
    /// that exists, is a manager and is not the employee itself.
    fn check_references(
        conn: &mut PgConnection,
        form: &EmployeeForm,
        existing: Option<&Employee>,
    ) -> Result<(), AppError> {
        let existing_id = existing.map(|e| e.id);

        if EmployeeRepo::exists_by_email_excluding_id(conn, &form.email, existing_id)? {
            return Err(AppError::conflict_with_code(
                "The email has already been taken.",
                Some("email".to_string()),
                error_codes::EMPLOYEE_EMAIL_EXISTS,
            ));
        }

        if let Some(department_id) = form.department_id {
            if !DepartmentRepo::exists(conn, department_id)? {
                return Err(AppError::invalid_field(
                    "department_id",
                    error_codes::EMPLOYEE_INVALID_DEPARTMENT,
                    "The selected department is invalid.",
                ));
            }
        }

        if let Some(manager_id) = form.manager_id {
            if Some(manager_id) == existing_id {
                return Err(invalid_manager("An employee cannot be their own manager."));
            }
            match EmployeeRepo::find_by_id(conn, manager_id)? {
                Some(manager) if manager.is_manager() => {}
                Some(_) => return Err(invalid_manager("The selected manager is not a manager.")),
                None => return Err(invalid_manager("The selected manager is invalid.")),
            }
            if let Some(existing) = existing {
                if EmployeeRepo::has_direct_reports(conn, existing.id)? {
                    return Err(invalid_manager(
                        "A manager with direct reports cannot be assigned a manager.",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn invalid_manager(message: &str) -> AppError {
    AppError::invalid_field("manager_id", error_codes::EMPLOYEE_INVALID_MANAGER, message)
}
