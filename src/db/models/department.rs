use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::models::employee::EmployeeSummary;
use crate::validation::rules::validate_not_blank;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::departments)]
pub struct NewDepartment {
    pub name: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::departments)]
pub struct DepartmentChanges {
    pub name: String,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct DepartmentRequest {
    #[validate(
        length(max = 255, message = "Name may not be greater than 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

/// Search result row: the department plus aggregates over its employees.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DepartmentSummary {
    #[serde(flatten)]
    pub department: Department,
    pub employees_count: i64,
    pub employees_sum_salary: i64,
}

/// Per-department aggregate as loaded from `employees`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmployeeAggregate {
    pub department_id: Uuid,
    pub employees_count: i64,
    pub employees_sum_salary: i64,
}

impl DepartmentSummary {
    /// Pairs each department with its aggregate; departments without
    /// employees get zero for both.
    pub fn merge(departments: Vec<Department>, aggregates: &[EmployeeAggregate]) -> Vec<Self> {
        departments
            .into_iter()
            .map(|department| {
                let aggregate = aggregates
                    .iter()
                    .find(|a| a.department_id == department.id);
                DepartmentSummary {
                    employees_count: aggregate.map_or(0, |a| a.employees_count),
                    employees_sum_salary: aggregate.map_or(0, |a| a.employees_sum_salary),
                    department,
                }
            })
            .collect()
    }
}

#[derive(Serialize, Debug)]
pub struct DepartmentDetail {
    #[serde(flatten)]
    pub department: Department,
    pub manager: Option<EmployeeSummary>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}
