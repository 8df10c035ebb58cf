//! Data-access contract for employee records.
//!
//! Each operation is a single round trip to the backing store: no retries,
//! no transactions, no cached state.

use crate::models::Employee;
use async_trait::async_trait;
use service_core::error::AppError;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Every record in store order. An empty collection is an empty vector.
    async fn list_all(&self) -> Result<Vec<Employee>, AppError>;

    /// The record with this id, or `None` when nothing matches.
    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, AppError>;

    /// Insert a record, assigning an id when it has none. Returns the stored record.
    async fn create(&self, employee: Employee) -> Result<Employee, AppError>;

    /// Overwrite the record with this id in full. A missing id is a silent no-op.
    async fn replace(&self, id: &str, employee: Employee) -> Result<(), AppError>;

    /// Remove the record with this id. A missing id is a silent no-op.
    async fn delete_by_id(&self, id: &str) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
