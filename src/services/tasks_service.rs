use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::auth::AuthEmployee,
    db::models::employee::Employee,
    db::models::task::{Task, TaskRequest},
    db::repositories::{EmployeeRepo, TaskRepo},
    error::AppError,
};

pub struct TasksService;

impl TasksService {
    /// Managers get the tasks they created, everyone else the tasks assigned to them.
    pub fn list(conn: &mut PgConnection, caller: &AuthEmployee) -> Result<Vec<Task>, AppError> {
        Ok(TaskRepo::list_in_scope(conn, caller.task_scope())?)
    }

    pub fn show(
        conn: &mut PgConnection,
        caller: &AuthEmployee,
        task_id: Uuid,
    ) -> Result<Task, AppError> {
        TaskRepo::find_by_id(conn, task_id)?
            .filter(|task| caller.task_scope().includes(task))
            .ok_or_else(|| AppError::not_found("Task"))
    }

    /// Employees a manager may assign tasks to.
    pub fn assignees(conn: &mut PgConnection, caller: &AuthEmployee) -> Result<Vec<Employee>, AppError> {
        Ok(EmployeeRepo::direct_reports(conn, caller.id)?)
    }

    pub fn create(
        conn: &mut PgConnection,
        caller: &AuthEmployee,
        req: TaskRequest,
    ) -> Result<Task, AppError> {
        Self::check_assignee(conn, caller, req.employee_id)?;
        let task = TaskRepo::insert(conn, &req.into_new_task(caller.id))?;
        tracing::info!(task_id = %task.id, created_by = %caller.id, "Task created");
        Ok(task)
    }

    pub fn update(
        conn: &mut PgConnection,
        caller: &AuthEmployee,
        task_id: Uuid,
        req: TaskRequest,
    ) -> Result<Task, AppError> {
        if TaskRepo::find_by_id(conn, task_id)?.is_none() {
            return Err(AppError::not_found("Task"));
        }
        Self::check_assignee(conn, caller, req.employee_id)?;
        Ok(TaskRepo::update(conn, task_id, &req.into_changes())?)
    }

    pub fn delete(conn: &mut PgConnection, task_id: Uuid) -> Result<(), AppError> {
        if TaskRepo::delete_by_id(conn, task_id)? == 0 {
            return Err(AppError::not_found("Task"));
        }
        Ok(())
    }

    /// An assignee must report directly to the manager handing out the task.
    fn check_assignee(
        conn: &mut PgConnection,
        caller: &AuthEmployee,
        employee_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(employee_id) = employee_id {
            if !EmployeeRepo::is_direct_report(conn, employee_id, caller.id)? {
                return Err(AppError::invalid_field(
                    "employee_id",
                    error_codes::TASK_INVALID_ASSIGNEE,
                    "The selected employee is not one of your direct reports.",
                ));
            }
        }
        Ok(())
    }
}
