use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::task::{NewTask, Task, TaskChanges, TaskScope};

pub struct TaskRepo;

impl TaskRepo {
    pub fn list_in_scope(
        conn: &mut PgConnection,
        scope: TaskScope,
    ) -> Result<Vec<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        let mut query = tasks.select(Task::as_select()).into_boxed();
        query = match scope {
            TaskScope::CreatedBy(manager) => query.filter(created_by.eq(manager)),
            TaskScope::AssignedTo(assignee) => query.filter(employee_id.eq(assignee)),
        };
        query.order((start_date.asc(), created_at.asc())).load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        task_id: Uuid,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks
            .filter(id.eq(task_id))
            .select(Task::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(conn: &mut PgConnection, new_task: &NewTask) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(crate::schema::tasks::table)
            .values(new_task)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        task_id: Uuid,
        changes: &TaskChanges,
    ) -> Result<Task, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::update(tasks.filter(id.eq(task_id)))
            .set(changes)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, task_id: Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::delete(tasks.filter(id.eq(task_id))).execute(conn)
    }
}
