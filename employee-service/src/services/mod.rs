pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoEmployeeStore;
pub use memory::InMemoryEmployeeStore;
pub use metrics::{get_metrics, init_metrics, record_store_call};
pub use store::EmployeeStore;
