use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::db::enums::EmployeeRole;
use crate::utils::AssetUrlHelper;
use crate::validation::rules::validate_not_blank;

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub salary: i32,
    pub department_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub role: EmployeeRole,
    pub image: Option<String>,
    pub password_hash: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Employee {
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub salary: i32,
    pub department_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub role: EmployeeRole,
    pub image: Option<String>,
    pub password_hash: String,
}

/// Full replace of an employee row. `None` on `image` or `password_hash`
/// keeps the stored value.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
pub struct EmployeeChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub salary: i32,
    pub department_id: Option<Option<Uuid>>,
    pub manager_id: Option<Option<Uuid>>,
    pub role: EmployeeRole,
    pub image: Option<String>,
    pub password_hash: Option<String>,
    pub updated_at: chrono::NaiveDateTime,
}

/// Validated employee form fields, as submitted with create and update.
#[derive(Validate, Debug, Clone, Default)]
pub struct EmployeeForm {
    #[validate(
        length(max = 255, message = "First name may not be greater than 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub first_name: String,

    #[validate(
        length(max = 255, message = "Last name may not be greater than 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub last_name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email may not be greater than 255 characters")
    )]
    pub email: String,

    #[validate(
        length(max = 20, message = "Phone may not be greater than 20 characters"),
        custom(function = "validate_not_blank")
    )]
    pub phone: String,

    #[validate(range(min = 0, message = "Salary must be at least 0"))]
    pub salary: i32,

    pub department_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl EmployeeForm {
    /// Field rules plus the password confirmation, reported on `password`.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.password != self.password_confirmation {
            let mut error = ValidationError::new("confirmed");
            error.message = Some("Password confirmation does not match".into());
            errors.add("password", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn role(&self) -> EmployeeRole {
        EmployeeRole::for_manager_id(self.manager_id)
    }
}

/// Employee as returned by the API; never exposes the password hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub salary: i32,
    pub department_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub role: EmployeeRole,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl EmployeeResponse {
    pub fn from_employee(employee: Employee, assets: &AssetUrlHelper) -> Self {
        let image_url = employee
            .image
            .as_deref()
            .map(|filename| assets.build_image_url(filename));
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            phone: employee.phone,
            salary: employee.salary,
            department_id: employee.department_id,
            manager_id: employee.manager_id,
            role: employee.role,
            image: employee.image,
            image_url,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }

    pub fn from_list(employees: Vec<Employee>, assets: &AssetUrlHelper) -> Vec<Self> {
        employees
            .into_iter()
            .map(|e| Self::from_employee(e, assets))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<Employee> for EmployeeSummary {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetsConfig;

    fn valid_form() -> EmployeeForm {
        EmployeeForm {
            first_name: "Ada".into(),
            last_name: "Smith".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0000".into(),
            salary: 52_000,
            department_id: None,
            manager_id: Some(Uuid::new_v4()),
            password: Some("correct-horse".into()),
            password_confirmation: Some("correct-horse".into()),
        }
    }

    #[test]
    fn form_validation() {
        assert!(valid_form().check().is_ok());

        let mut form = valid_form();
        form.email = "not-an-email".into();
        assert!(form.check().is_err());

        let mut form = valid_form();
        form.salary = -1;
        assert!(form.check().is_err());

        let mut form = valid_form();
        form.phone = "1".repeat(21);
        assert!(form.check().is_err());

        let mut form = valid_form();
        form.first_name = " ".into();
        assert!(form.check().is_err());
    }

    #[test]
    fn password_rules_apply_only_when_present() {
        let mut form = valid_form();
        form.password = None;
        form.password_confirmation = None;
        assert!(form.check().is_ok());

        let mut form = valid_form();
        form.password_confirmation = Some("something-else".into());
        let errors = form.check().unwrap_err();
        assert_eq!(errors.field_errors()["password"][0].code, "confirmed");

        let mut form = valid_form();
        form.password_confirmation = None;
        assert!(form.check().unwrap_err().field_errors().contains_key("password"));

        let mut form = valid_form();
        form.password = Some("short".into());
        form.password_confirmation = Some("short".into());
        let errors = form.check().unwrap_err();
        assert_eq!(errors.field_errors()["password"][0].code, "length");
    }

    #[test]
    fn role_comes_from_manager_id() {
        let mut form = valid_form();
        assert_eq!(form.role(), EmployeeRole::Employee);
        form.manager_id = None;
        assert_eq!(form.role(), EmployeeRole::Manager);
    }

    #[test]
    fn response_hides_hash_and_builds_image_url() {
        let now = chrono::Utc::now().naive_utc();
        let employee = Employee {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Smith".into(),
            email: "ada@example.com".into(),
            phone: "123".into(),
            salary: 1,
            department_id: None,
            manager_id: None,
            role: EmployeeRole::Manager,
            image: Some("1700000000123.png".into()),
            password_hash: "$2b$secret".into(),
            created_at: now,
            updated_at: now,
        };
        let assets = AssetUrlHelper::new(&AssetsConfig {
            base_url: "http://localhost:8000/assets".into(),
        });

        let response = EmployeeResponse::from_employee(employee, &assets);
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(
            json["image_url"],
            "http://localhost:8000/assets/images/1700000000123.png"
        );
        assert_eq!(json["role"], "manager");
    }
}
