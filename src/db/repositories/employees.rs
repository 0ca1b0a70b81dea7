use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::EmployeeRole;
use crate::db::models::employee::{Employee, EmployeeChanges, NewEmployee};

pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Employees that report to someone; manager accounts are left out.
    pub fn list_reports(conn: &mut PgConnection) -> Result<Vec<Employee>, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        employees
            .filter(manager_id.is_not_null())
            .select(Employee::as_select())
            .order((last_name.asc(), first_name.asc()))
            .load(conn)
    }

    /// Employees whose own first/last name contains `term`, or whose
    /// manager's first/last name does.
    pub fn search(conn: &mut PgConnection, term: &str) -> Result<Vec<Employee>, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        let pattern = format!("%{}%", term);

        let matching_managers: Vec<Uuid> = employees
            .filter(first_name.like(&pattern).or(last_name.like(&pattern)))
            .select(id)
            .load(conn)?;

        employees
            .filter(
                first_name
                    .like(&pattern)
                    .or(last_name.like(&pattern))
                    .or(manager_id.assume_not_null().eq_any(matching_managers)),
            )
            .select(Employee::as_select())
            .order((last_name.asc(), first_name.asc()))
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        employee_id: Uuid,
    ) -> Result<Option<Employee>, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        employees
            .filter(id.eq(employee_id))
            .select(Employee::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        employee_email: &str,
    ) -> Result<Option<Employee>, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        employees
            .filter(email.eq(employee_email))
            .select(Employee::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists_by_email_excluding_id(
        conn: &mut PgConnection,
        employee_email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        match exclude_id {
            Some(exclude_id) => diesel::select(diesel::dsl::exists(
                employees
                    .filter(email.eq(employee_email))
                    .filter(id.ne(exclude_id)),
            ))
            .get_result(conn),
            None => diesel::select(diesel::dsl::exists(
                employees.filter(email.eq(employee_email)),
            ))
            .get_result(conn),
        }
    }

    pub fn exists_in_department(
        conn: &mut PgConnection,
        dept_id: Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        diesel::select(diesel::dsl::exists(
            employees.filter(department_id.eq(dept_id)),
        ))
        .get_result(conn)
    }

    pub fn has_direct_reports(
        conn: &mut PgConnection,
        employee_id: Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        diesel::select(diesel::dsl::exists(
            employees.filter(manager_id.eq(employee_id)),
        ))
        .get_result(conn)
    }

    pub fn is_direct_report(
        conn: &mut PgConnection,
        employee_id: Uuid,
        of_manager: Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        diesel::select(diesel::dsl::exists(
            employees
                .filter(id.eq(employee_id))
                .filter(manager_id.eq(of_manager)),
        ))
        .get_result(conn)
    }

    pub fn direct_reports(
        conn: &mut PgConnection,
        of_manager: Uuid,
    ) -> Result<Vec<Employee>, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        employees
            .filter(manager_id.eq(of_manager))
            .select(Employee::as_select())
            .order((last_name.asc(), first_name.asc()))
            .load(conn)
    }

    pub fn manager_of_department(
        conn: &mut PgConnection,
        dept_id: Uuid,
    ) -> Result<Option<Employee>, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        employees
            .filter(department_id.eq(dept_id))
            .filter(role.eq(EmployeeRole::Manager))
            .select(Employee::as_select())
            .order(created_at.asc())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_employee: &NewEmployee,
    ) -> Result<Employee, diesel::result::Error> {
        diesel::insert_into(crate::schema::employees::table)
            .values(new_employee)
            .returning(Employee::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        employee_id: Uuid,
        changes: &EmployeeChanges,
    ) -> Result<Employee, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        diesel::update(employees.filter(id.eq(employee_id)))
            .set(changes)
            .returning(Employee::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        employee_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        diesel::delete(employees.filter(id.eq(employee_id))).execute(conn)
    }
}
