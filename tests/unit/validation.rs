// Request validation without a database

use std::collections::HashMap;

use hr_backend::{
    db::models::{
        auth::{LoginRequest, RefreshTokenRequest},
        department::DepartmentRequest,
        task::TaskRequest,
    },
    error::AppError,
    storage::ImageUpload,
    validation::employee::{parse_employee_form, require_password},
};
use validator::Validate;

fn employee_fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    let mut fields: HashMap<String, String> = [
        ("first_name", "Katherine"),
        ("last_name", "Johnson"),
        ("email", "katherine@example.com"),
        ("phone", "555-0142"),
        ("salary", "6100"),
        ("department_id", ""),
        ("manager_id", ""),
        ("password", "trajectory"),
        ("password_confirmation", "trajectory"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in pairs {
        fields.insert(k.to_string(), v.to_string());
    }
    fields
}

fn invalid_fields(result: Result<impl std::fmt::Debug, AppError>) -> Vec<String> {
    match result {
        Err(AppError::InvalidInput { errors }) => errors.into_iter().filter_map(|e| e.field).collect(),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn department_name_rules() {
    assert!(DepartmentRequest { name: "Engineering".into() }.validate().is_ok());
    assert!(DepartmentRequest { name: "".into() }.validate().is_err());
    assert!(DepartmentRequest { name: "   ".into() }.validate().is_err());
    assert!(DepartmentRequest { name: "x".repeat(256) }.validate().is_err());
    assert!(DepartmentRequest { name: "x".repeat(255) }.validate().is_ok());
}

#[test]
fn employee_form_rules() {
    let form = parse_employee_form(employee_fields(&[])).unwrap();
    assert!(form.role().is_manager());
    assert!(require_password(&form).is_ok());

    assert_eq!(invalid_fields(parse_employee_form(employee_fields(&[("email", "nope")]))), vec!["email"]);
    assert_eq!(invalid_fields(parse_employee_form(employee_fields(&[("salary", "-1")]))), vec!["salary"]);
    let long_phone = "5".repeat(21);
    assert_eq!(
        invalid_fields(parse_employee_form(employee_fields(&[("phone", long_phone.as_str())]))),
        vec!["phone"]
    );
    assert_eq!(
        invalid_fields(parse_employee_form(employee_fields(&[("password_confirmation", "different")]))),
        vec!["password"]
    );
    assert_eq!(
        invalid_fields(parse_employee_form(employee_fields(&[("manager_id", "boss")]))),
        vec!["manager_id"]
    );
}

#[test]
fn employee_update_may_omit_password() {
    let form = parse_employee_form(employee_fields(&[("password", ""), ("password_confirmation", "")])).unwrap();
    assert!(form.password.is_none());
    assert!(require_password(&form).is_err());
}

#[test]
fn image_rules() {
    let limit = 2048 * 1024;
    for name in ["a.jpeg", "a.jpg", "a.png", "a.gif", "a.svg", "A.PNG"] {
        assert!(ImageUpload::new(name, vec![1]).validate(limit).is_ok(), "{name}");
    }
    assert!(ImageUpload::new("a.bmp", vec![1]).validate(limit).is_err());
    assert!(ImageUpload::new("a.png", vec![0; limit + 1]).validate(limit).is_err());
}

#[test]
fn task_request_rules() {
    let task: TaskRequest = serde_json::from_value(serde_json::json!({
        "name": "Quarterly report",
        "description": "Numbers",
        "start_date": "2024-04-01",
        "end_date": "2024-04-05",
        "employee_id": null,
        "status": "in_progress"
    }))
    .unwrap();
    assert!(task.validate().is_ok());

    let unknown_status = serde_json::from_value::<TaskRequest>(serde_json::json!({
        "name": "Quarterly report",
        "description": "Numbers",
        "start_date": "2024-04-01",
        "end_date": "2024-04-05",
        "status": "blocked"
    }));
    assert!(unknown_status.is_err());

    let mut blank = task.clone();
    blank.description = " ".into();
    assert!(blank.validate().is_err());
}

#[test]
fn login_request_rules() {
    let ok = LoginRequest { email: "a@example.com".into(), password: "x".into() };
    assert!(ok.validate().is_ok());
    let bad = LoginRequest { email: "a".into(), password: "".into() };
    assert!(bad.validate().is_err());
}

#[test]
fn refresh_request_rules() {
    assert!(RefreshTokenRequest { refresh_token: "eyJ.a.b".into() }.validate().is_ok());
    assert!(RefreshTokenRequest { refresh_token: "".into() }.validate().is_err());
}
