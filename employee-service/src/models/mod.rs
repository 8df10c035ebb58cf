pub mod employee;

pub use employee::{parse_employee_id, Employee, EmployeeDocument};
