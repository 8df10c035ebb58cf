use crate::models::{parse_employee_id, Employee, EmployeeDocument};
use crate::services::metrics::record_store_call;
use crate::services::store::EmployeeStore;
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Mutex;

/// Process-local [`EmployeeStore`] with the same observable semantics as the
/// MongoDB store: generated `ObjectId`s, insertion order, duplicate-id
/// conflicts, and silent no-ops for replace/delete on a missing id.
pub struct InMemoryEmployeeStore {
    pub documents: Mutex<Vec<EmployeeDocument>>,
}

impl Default for InMemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<EmployeeDocument>>, AppError> {
        self.documents.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list_all(&self) -> Result<Vec<Employee>, AppError> {
        let result = self.lock();
        record_store_call("list_all", result.is_ok());

        let documents = result?;
        Ok(documents.iter().cloned().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, AppError> {
        let Some(oid) = parse_employee_id(id) else {
            return Ok(None);
        };
        let result = self.lock();
        record_store_call("find_by_id", result.is_ok());

        let documents = result?;
        Ok(documents
            .iter()
            .find(|document| document.id == oid)
            .cloned()
            .map(Employee::from))
    }

    async fn create(&self, employee: Employee) -> Result<Employee, AppError> {
        let document = EmployeeDocument::try_from(employee)?;
        let mut documents = self.lock()?;

        let duplicate = documents.iter().any(|existing| existing.id == document.id);
        record_store_call("create", !duplicate);
        if duplicate {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Employee with Id = {} already exists",
                document.id.to_hex()
            )));
        }

        documents.push(document.clone());
        Ok(Employee::from(document))
    }

    async fn replace(&self, id: &str, employee: Employee) -> Result<(), AppError> {
        let Some(oid) = parse_employee_id(id) else {
            return Ok(());
        };
        let result = self.lock();
        record_store_call("replace", result.is_ok());

        let mut documents = result?;
        if let Some(slot) = documents.iter_mut().find(|document| document.id == oid) {
            *slot = EmployeeDocument::with_id(oid, employee);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        let Some(oid) = parse_employee_id(id) else {
            return Ok(());
        };
        let result = self.lock();
        record_store_call("delete_by_id", result.is_ok());

        let mut documents = result?;
        if let Some(index) = documents.iter().position(|document| document.id == oid) {
            documents.remove(index);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
