pub mod employees;
pub mod health;

pub use employees::{
    create_employee, delete_employee, get_employee, list_employees, update_employee,
    MessageResponse, EMPLOYEES_PATH,
};
pub use health::{health_check, metrics_endpoint, readiness_check};
