pub mod departments;
pub mod employees;
pub mod tasks;

pub use departments::DepartmentRepo;
pub use employees::EmployeeRepo;
pub use tasks::TaskRepo;
