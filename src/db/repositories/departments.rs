use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::department::{
    Department, DepartmentChanges, EmployeeAggregate, NewDepartment,
};

pub struct DepartmentRepo;

impl DepartmentRepo {
    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Department>, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        departments
            .select(Department::as_select())
            .order(created_at.asc())
            .load(conn)
    }

    /// Departments whose name contains `term` (`LIKE`, so the column
    /// collation decides case sensitivity).
    pub fn search_by_name(
        conn: &mut PgConnection,
        term: &str,
    ) -> Result<Vec<Department>, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        let pattern = format!("%{}%", term);
        departments
            .filter(name.like(pattern))
            .select(Department::as_select())
            .order(created_at.asc())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        department_id: Uuid,
    ) -> Result<Option<Department>, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        departments
            .filter(id.eq(department_id))
            .select(Department::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists(conn: &mut PgConnection, department_id: Uuid) -> Result<bool, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        diesel::select(diesel::dsl::exists(departments.filter(id.eq(department_id)))).get_result(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_department: &NewDepartment,
    ) -> Result<Department, diesel::result::Error> {
        diesel::insert_into(crate::schema::departments::table)
            .values(new_department)
            .returning(Department::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        department_id: Uuid,
        changes: &DepartmentChanges,
    ) -> Result<Department, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        diesel::update(departments.filter(id.eq(department_id)))
            .set(changes)
            .returning(Department::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        department_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        diesel::delete(departments.filter(id.eq(department_id))).execute(conn)
    }

    /// Employee count and salary sum per department, for the given departments.
    /// Departments without employees are absent from the result.
    pub fn employee_aggregates(
        conn: &mut PgConnection,
        department_ids: &[Uuid],
    ) -> Result<Vec<EmployeeAggregate>, diesel::result::Error> {
        use crate::schema::employees::dsl as e;
        use diesel::dsl::{count, sum};

        if department_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(Option<Uuid>, i64, Option<i64>)> = e::employees
            .filter(e::department_id.eq_any(department_ids.to_vec()))
            .group_by(e::department_id)
            .select((e::department_id, count(e::id), sum(e::salary)))
            .load(conn)?;

        Ok(rows
            .into_iter()
            .filter_map(|(department_id, employees_count, salary_sum)| {
                department_id.map(|department_id| EmployeeAggregate {
                    department_id,
                    employees_count,
                    employees_sum_salary: salary_sum.unwrap_or(0),
                })
            })
            .collect())
    }
}
