use std::sync::Arc;

use hr_backend::{
    db::models::employee::EmployeeForm,
    db::repositories::EmployeeRepo,
    error::AppError,
    services::EmployeesService,
    storage::{ImageStorage, ImageUpload, MemoryBlobStore, images::image_path},
};
use uuid::Uuid;

use crate::{insert_department, insert_employee, test_connection};

const BCRYPT_COST: u32 = 4;

fn images() -> (Arc<MemoryBlobStore>, ImageStorage) {
    let blobs = Arc::new(MemoryBlobStore::new());
    let images = ImageStorage::new(blobs.clone(), 2048 * 1024);
    (blobs, images)
}

fn form(manager_id: Option<Uuid>) -> EmployeeForm {
    EmployeeForm {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: format!("ada-{}@example.com", Uuid::new_v4().simple()),
        phone: "555-0199".to_string(),
        salary: 5100,
        department_id: None,
        manager_id,
        password: Some("analytical".to_string()),
        password_confirmation: Some("analytical".to_string()),
    }
}

fn jpg() -> ImageUpload {
    ImageUpload::new("portrait.jpg", vec![0xff, 0xd8, 0xff, 0xe0])
}

fn has_integer_stem(filename: &str, extension: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => ext == extension && stem.parse::<u128>().is_ok(),
        None => false,
    }
}

#[test]
#[ignore = "requires database"]
fn list_only_contains_employees_with_a_manager() {
    let mut conn = test_connection();
    let manager = insert_employee(&mut conn, "Mona", "Manager", 9000, None, None);
    let report = insert_employee(&mut conn, "Rick", "Report", 4000, None, Some(manager.id));

    let listed = EmployeesService::list(&mut conn).unwrap();

    assert!(listed.iter().all(|e| e.manager_id.is_some()));
    assert!(listed.iter().any(|e| e.id == report.id));
    assert!(!listed.iter().any(|e| e.id == manager.id));
}

#[test]
#[ignore = "requires database"]
fn search_matches_own_or_manager_name() {
    let mut conn = test_connection();
    let smith = insert_employee(&mut conn, "Sarah", "Smith", 9000, None, None);
    let under_smith = insert_employee(&mut conn, "Tom", "Jones", 3000, None, Some(smith.id));
    let other_manager = insert_employee(&mut conn, "Olga", "Other", 9000, None, None);
    let named_smith = insert_employee(&mut conn, "Smithers", "Waylon", 3000, None, Some(other_manager.id));
    let unrelated = insert_employee(&mut conn, "Uma", "Unrelated", 3000, None, Some(other_manager.id));

    let found: Vec<Uuid> = EmployeesService::search(&mut conn, "Smith")
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();

    assert!(found.contains(&smith.id));
    assert!(found.contains(&under_smith.id));
    assert!(found.contains(&named_smith.id));
    assert!(!found.contains(&unrelated.id));
    assert!(!found.contains(&other_manager.id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_with_image_stores_blob_and_filename() {
    let mut conn = test_connection();
    let (blobs, images) = images();
    let manager = insert_employee(&mut conn, "Mia", "Manager", 9000, None, None);

    let employee = EmployeesService::create(&mut conn, &images, form(Some(manager.id)), Some(jpg()), BCRYPT_COST)
        .await
        .unwrap();

    let filename = employee.image.clone().expect("image filename stored");
    assert!(has_integer_stem(&filename, "jpg"), "{filename}");
    assert_eq!(blobs.paths(), vec![image_path(&filename)]);
    assert!(!employee.is_manager());

    let stored = EmployeeRepo::find_by_id(&mut conn, employee.id).unwrap().unwrap();
    assert_eq!(stored.image.as_deref(), Some(filename.as_str()));
}

#[tokio::test]
#[ignore = "requires database"]
async fn failed_insert_removes_written_blob() {
    let mut conn = test_connection();
    let (blobs, images) = images();

    // passes the service checks but exceeds the phone column
    let mut bad = form(None);
    bad.phone = "0".repeat(40);

    let result = EmployeesService::create(&mut conn, &images, bad, Some(jpg()), BCRYPT_COST).await;

    assert!(matches!(result, Err(AppError::Database(_))));
    assert!(blobs.paths().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn rejects_duplicate_email_and_non_manager_manager() {
    let mut conn = test_connection();
    let (blobs, images) = images();
    let manager = insert_employee(&mut conn, "Max", "Manager", 9000, None, None);
    let report = insert_employee(&mut conn, "Rita", "Report", 3000, None, Some(manager.id));

    let mut duplicate = form(None);
    duplicate.email = report.email.clone();
    let result = EmployeesService::create(&mut conn, &images, duplicate, Some(jpg()), BCRYPT_COST).await;
    assert!(matches!(result, Err(AppError::Conflict { .. })));

    let result = EmployeesService::create(&mut conn, &images, form(Some(report.id)), None, BCRYPT_COST).await;
    assert!(matches!(result, Err(AppError::InvalidInput { .. })));

    let result = EmployeesService::create(
        &mut conn,
        &images,
        {
            let mut f = form(None);
            f.department_id = Some(Uuid::new_v4());
            f
        },
        None,
        BCRYPT_COST,
    )
    .await;
    assert!(matches!(result, Err(AppError::InvalidInput { .. })));

    assert!(blobs.paths().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_replaces_image_after_row_update() {
    let mut conn = test_connection();
    let (blobs, images) = images();
    let department_id = insert_department(&mut conn, "Research");

    let created = EmployeesService::create(&mut conn, &images, form(None), Some(jpg()), BCRYPT_COST)
        .await
        .unwrap();
    let old = created.image.clone().unwrap();

    let mut changes = form(None);
    changes.email = created.email.clone();
    changes.department_id = Some(department_id);
    changes.password = None;
    changes.password_confirmation = None;

    let updated = EmployeesService::update(
        &mut conn,
        &images,
        created.id,
        changes,
        Some(ImageUpload::new("new.png", vec![1, 2, 3])),
        BCRYPT_COST,
    )
    .await
    .unwrap();

    let new = updated.image.clone().unwrap();
    assert_ne!(old, new);
    assert!(new.ends_with(".png"));
    assert_eq!(blobs.paths(), vec![image_path(&new)]);
    assert_eq!(updated.department_id, Some(department_id));
    assert_eq!(updated.password_hash, created.password_hash);
}

#[tokio::test]
#[ignore = "requires database"]
async fn failed_update_keeps_previous_image() {
    let mut conn = test_connection();
    let (blobs, images) = images();

    let created = EmployeesService::create(&mut conn, &images, form(None), Some(jpg()), BCRYPT_COST)
        .await
        .unwrap();
    let old = created.image.clone().unwrap();

    let mut changes = form(None);
    changes.email = created.email.clone();
    changes.phone = "9".repeat(40);

    let result = EmployeesService::update(&mut conn, &images, created.id, changes, Some(jpg()), BCRYPT_COST).await;

    assert!(result.is_err());
    assert_eq!(blobs.paths(), vec![image_path(&old)]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_removes_row_and_image() {
    let mut conn = test_connection();
    let (blobs, images) = images();

    let created = EmployeesService::create(&mut conn, &images, form(None), Some(jpg()), BCRYPT_COST)
        .await
        .unwrap();

    EmployeesService::delete(&mut conn, &images, created.id).await.unwrap();

    assert!(EmployeeRepo::find_by_id(&mut conn, created.id).unwrap().is_none());
    assert!(blobs.paths().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_refuses_manager_with_reports() {
    let mut conn = test_connection();
    let (_, images) = images();
    let manager = insert_employee(&mut conn, "Mel", "Manager", 9000, None, None);
    insert_employee(&mut conn, "Rob", "Report", 3000, None, Some(manager.id));

    let result = EmployeesService::delete(&mut conn, &images, manager.id).await;
    assert!(matches!(result, Err(AppError::Conflict { .. })));
}
