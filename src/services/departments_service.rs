use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::department::{
        Department, DepartmentChanges, DepartmentDetail, DepartmentRequest, DepartmentSummary,
        NewDepartment,
    },
    db::repositories::{DepartmentRepo, EmployeeRepo},
    error::AppError,
};

pub const DEPARTMENT_HAS_EMPLOYEES: &str =
    "Department cannot be deleted because it has employees assigned to it.";

pub struct DepartmentsService;

impl DepartmentsService {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<Department>, AppError> {
        Ok(DepartmentRepo::list_all(conn)?)
    }

    pub fn search(conn: &mut PgConnection, term: &str) -> Result<Vec<DepartmentSummary>, AppError> {
        let departments = DepartmentRepo::search_by_name(conn, term)?;
        let ids: Vec<Uuid> = departments.iter().map(|d| d.id).collect();
        let aggregates = DepartmentRepo::employee_aggregates(conn, &ids)?;
        Ok(DepartmentSummary::merge(departments, &aggregates))
    }

    pub fn show(conn: &mut PgConnection, department_id: Uuid) -> Result<DepartmentDetail, AppError> {
        let department = DepartmentRepo::find_by_id(conn, department_id)?
            .ok_or_else(|| AppError::not_found("Department"))?;
        let manager = EmployeeRepo::manager_of_department(conn, department_id)?.map(Into::into);
        Ok(DepartmentDetail { department, manager })
    }

    pub fn create(conn: &mut PgConnection, req: &DepartmentRequest) -> Result<Department, AppError> {
        let new_department = NewDepartment {
            name: req.name.trim().to_string(),
        };
        Ok(DepartmentRepo::insert(conn, &new_department)?)
    }

    pub fn update(
        conn: &mut PgConnection,
        department_id: Uuid,
        req: &DepartmentRequest,
    ) -> Result<Department, AppError> {
        if DepartmentRepo::find_by_id(conn, department_id)?.is_none() {
            return Err(AppError::not_found("Department"));
        }
        let changes = DepartmentChanges {
            name: req.name.trim().to_string(),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        Ok(DepartmentRepo::update(conn, department_id, &changes)?)
    }

    /// Removes the department unless an employee still references it.
    pub fn delete(conn: &mut PgConnection, department_id: Uuid) -> Result<(), AppError> {
        conn.transaction::<(), AppError, _>(|conn| {
            if DepartmentRepo::find_by_id(conn, department_id)?.is_none() {
                return Err(AppError::not_found("Department"));
            }

            if EmployeeRepo::exists_in_department(conn, department_id)? {
                tracing::info!(department_id = %department_id, "Refusing to delete department with employees");
                return Err(AppError::conflict_with_code(
                    DEPARTMENT_HAS_EMPLOYEES,
                    None,
                    error_codes::DEPARTMENT_HAS_EMPLOYEES,
                ));
            }

            DepartmentRepo::delete_by_id(conn, department_id)?;
            Ok(())
        })
    }
}
