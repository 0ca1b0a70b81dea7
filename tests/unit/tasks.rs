use chrono::NaiveDate;
use hr_backend::{
    db::enums::TaskStatus,
    db::models::task::TaskRequest,
    error::AppError,
    services::TasksService,
};
use uuid::Uuid;

use crate::{caller, insert_employee, test_connection};

fn request(name: &str, employee_id: Option<Uuid>) -> TaskRequest {
    TaskRequest {
        name: name.to_string(),
        description: format!("{} description", name),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        employee_id,
        status: TaskStatus::Pending,
    }
}

#[test]
#[ignore = "requires database"]
fn listing_depends_on_the_callers_role() {
    let mut conn = test_connection();
    let alice = insert_employee(&mut conn, "Alice", "Manager", 9000, None, None);
    let bruno = insert_employee(&mut conn, "Bruno", "Manager", 9000, None, None);
    let carl = insert_employee(&mut conn, "Carl", "Report", 3000, None, Some(alice.id));
    let dina = insert_employee(&mut conn, "Dina", "Report", 3000, None, Some(bruno.id));

    let by_alice = TasksService::create(&mut conn, &caller(&alice), request("Audit", Some(carl.id))).unwrap();
    let unassigned = TasksService::create(&mut conn, &caller(&alice), request("Backlog", None)).unwrap();
    let by_bruno = TasksService::create(&mut conn, &caller(&bruno), request("Review", Some(dina.id))).unwrap();

    let alice_sees: Vec<Uuid> = TasksService::list(&mut conn, &caller(&alice))
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(alice_sees.len(), 2);
    assert!(alice_sees.contains(&by_alice.id) && alice_sees.contains(&unassigned.id));

    let carl_sees = TasksService::list(&mut conn, &caller(&carl)).unwrap();
    assert_eq!(carl_sees.len(), 1);
    assert!(carl_sees.iter().all(|t| t.employee_id == Some(carl.id)));

    let dina_sees = TasksService::list(&mut conn, &caller(&dina)).unwrap();
    assert_eq!(dina_sees.iter().map(|t| t.id).collect::<Vec<_>>(), vec![by_bruno.id]);
}

#[test]
#[ignore = "requires database"]
fn show_hides_tasks_outside_the_callers_scope() {
    let mut conn = test_connection();
    let manager = insert_employee(&mut conn, "Mara", "Manager", 9000, None, None);
    let assignee = insert_employee(&mut conn, "Abe", "Assignee", 3000, None, Some(manager.id));
    let bystander = insert_employee(&mut conn, "Bea", "Bystander", 3000, None, Some(manager.id));

    let task = TasksService::create(&mut conn, &caller(&manager), request("Inventory", Some(assignee.id))).unwrap();

    assert!(TasksService::show(&mut conn, &caller(&assignee), task.id).is_ok());
    assert!(matches!(
        TasksService::show(&mut conn, &caller(&bystander), task.id),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
#[ignore = "requires database"]
fn assignee_must_be_a_direct_report() {
    let mut conn = test_connection();
    let manager = insert_employee(&mut conn, "Nora", "Manager", 9000, None, None);
    let other_manager = insert_employee(&mut conn, "Oscar", "Manager", 9000, None, None);
    let stranger = insert_employee(&mut conn, "Sid", "Stranger", 3000, None, Some(other_manager.id));

    let result = TasksService::create(&mut conn, &caller(&manager), request("Payroll", Some(stranger.id)));
    assert!(matches!(result, Err(AppError::InvalidInput { .. })));

    let assignees = TasksService::assignees(&mut conn, &caller(&other_manager)).unwrap();
    assert_eq!(assignees.iter().map(|e| e.id).collect::<Vec<_>>(), vec![stranger.id]);
}

#[test]
#[ignore = "requires database"]
fn update_and_delete() {
    let mut conn = test_connection();
    let manager = insert_employee(&mut conn, "Uri", "Manager", 9000, None, None);
    let report = insert_employee(&mut conn, "Vic", "Report", 3000, None, Some(manager.id));

    let task = TasksService::create(&mut conn, &caller(&manager), request("Onboarding", None)).unwrap();

    let mut changes = request("Onboarding v2", Some(report.id));
    changes.status = TaskStatus::InProgress;
    let updated = TasksService::update(&mut conn, &caller(&manager), task.id, changes).unwrap();
    assert_eq!(updated.name, "Onboarding v2");
    assert_eq!(updated.employee_id, Some(report.id));
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.created_by, manager.id);

    TasksService::delete(&mut conn, task.id).unwrap();
    assert!(matches!(
        TasksService::delete(&mut conn, task.id),
        Err(AppError::NotFound { .. })
    ));
}
