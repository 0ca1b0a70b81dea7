use diesel::prelude::*;
use hr_backend::{
    db::models::department::DepartmentRequest,
    db::repositories::DepartmentRepo,
    error::AppError,
    schema::employees,
    services::{DepartmentsService, departments_service::DEPARTMENT_HAS_EMPLOYEES},
};

use crate::{insert_department, insert_employee, test_connection};

#[test]
#[ignore = "requires database"]
fn delete_refuses_department_with_employees() {
    let mut conn = test_connection();
    let department_id = insert_department(&mut conn, "Operations");
    insert_employee(&mut conn, "Dana", "Boss", 9000, Some(department_id), None);

    match DepartmentsService::delete(&mut conn, department_id) {
        Err(AppError::Conflict { message, .. }) => assert_eq!(message, DEPARTMENT_HAS_EMPLOYEES),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(DepartmentRepo::exists(&mut conn, department_id).unwrap());
}

#[test]
#[ignore = "requires database"]
fn delete_removes_empty_department() {
    let mut conn = test_connection();
    let department_id = insert_department(&mut conn, "Facilities");

    DepartmentsService::delete(&mut conn, department_id).unwrap();

    assert!(!DepartmentRepo::exists(&mut conn, department_id).unwrap());
    assert!(matches!(
        DepartmentsService::delete(&mut conn, department_id),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
#[ignore = "requires database"]
fn search_matches_name_and_aggregates_employees() {
    let mut conn = test_connection();
    let engineering = insert_department(&mut conn, "Engineering");
    let platform_eng = insert_department(&mut conn, "Platform Eng");
    let sales = insert_department(&mut conn, "Sales");

    let lead = insert_employee(&mut conn, "Lena", "Lead", 7000, Some(engineering), None);
    insert_employee(&mut conn, "Ivan", "Dev", 4000, Some(engineering), Some(lead.id));
    insert_employee(&mut conn, "Sam", "Seller", 3000, Some(sales), Some(lead.id));

    let results = DepartmentsService::search(&mut conn, "Eng").unwrap();

    assert!(results.iter().all(|row| row.department.name.contains("Eng")));
    assert!(results.iter().any(|row| row.department.id == platform_eng));
    assert!(!results.iter().any(|row| row.department.id == sales));

    for row in &results {
        let salaries: Vec<i32> = employees::table
            .filter(employees::department_id.eq(row.department.id))
            .select(employees::salary)
            .load(&mut conn)
            .unwrap();
        assert_eq!(row.employees_count, salaries.len() as i64);
        assert_eq!(
            row.employees_sum_salary,
            salaries.iter().map(|s| *s as i64).sum::<i64>()
        );
    }

    let engineering_row = results
        .iter()
        .find(|row| row.department.id == engineering)
        .unwrap();
    assert_eq!(engineering_row.employees_count, 2);
    assert_eq!(engineering_row.employees_sum_salary, 11000);

    let platform_row = results
        .iter()
        .find(|row| row.department.id == platform_eng)
        .unwrap();
    assert_eq!((platform_row.employees_count, platform_row.employees_sum_salary), (0, 0));
}

#[test]
#[ignore = "requires database"]
fn show_includes_department_manager() {
    let mut conn = test_connection();
    let department_id = insert_department(&mut conn, "Finance");
    let manager = insert_employee(&mut conn, "Fiona", "Chief", 8000, Some(department_id), None);
    insert_employee(&mut conn, "Frank", "Clerk", 3000, Some(department_id), Some(manager.id));

    let detail = DepartmentsService::show(&mut conn, department_id).unwrap();
    assert_eq!(detail.manager.map(|m| m.id), Some(manager.id));
}

#[test]
#[ignore = "requires database"]
fn update_replaces_name() {
    let mut conn = test_connection();
    let department_id = insert_department(&mut conn, "Legal");

    let updated = DepartmentsService::update(
        &mut conn,
        department_id,
        &DepartmentRequest {
            name: "  Legal & Compliance ".to_string(),
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Legal & Compliance");
}
