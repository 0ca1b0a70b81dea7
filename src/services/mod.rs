pub mod accounts_service;
pub mod departments_service;
pub mod employees_service;
pub mod tasks_service;

pub use accounts_service::AccountsService;
pub use departments_service::DepartmentsService;
pub use employees_service::EmployeesService;
pub use tasks_service::TasksService;
