mod access_guard;
mod departments;
mod employees;
mod tasks;
mod validation;
