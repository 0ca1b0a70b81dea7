use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::TaskStatus;
use crate::validation::rules::validate_not_blank;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub employee_id: Option<Uuid>,
    pub created_by: Uuid,
    pub status: TaskStatus,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub employee_id: Option<Uuid>,
    pub created_by: Uuid,
    pub status: TaskStatus,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tasks)]
pub struct TaskChanges {
    pub name: String,
    pub description: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub employee_id: Option<Option<Uuid>>,
    pub status: TaskStatus,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct TaskRequest {
    #[validate(
        length(max = 255, message = "Name may not be greater than 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(
        length(max = 255, message = "Description may not be greater than 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub description: String,

    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub employee_id: Option<Uuid>,
    pub status: TaskStatus,
}

impl TaskRequest {
    pub fn into_new_task(self, created_by: Uuid) -> NewTask {
        NewTask {
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            employee_id: self.employee_id,
            created_by,
            status: self.status,
        }
    }

    pub fn into_changes(self) -> TaskChanges {
        TaskChanges {
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            employee_id: Some(self.employee_id),
            status: self.status,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Which tasks a caller is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Tasks the manager created for their reports.
    CreatedBy(Uuid),
    /// Tasks assigned to the caller.
    AssignedTo(Uuid),
}

impl TaskScope {
    pub fn includes(&self, task: &Task) -> bool {
        match *self {
            TaskScope::CreatedBy(id) => task.created_by == id,
            TaskScope::AssignedTo(id) => task.employee_id == Some(id),
        }
    }
}
