use crate::config::EmployeeDatabaseSettings;
use crate::models::{parse_employee_id, Employee, EmployeeDocument};
use crate::services::metrics::record_store_call;
use crate::services::store::EmployeeStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoEmployeeStore {
    client: MongoClient,
    db: Database,
    employees: Collection<EmployeeDocument>,
}

impl MongoEmployeeStore {
    /// Open the client, bind the configured collection, and ping the server.
    ///
    /// The driver connects lazily, so the ping is what surfaces an unreachable
    /// store at startup.
    pub async fn connect(settings: &impl EmployeeDatabaseSettings) -> Result<Self, AppError> {
        tracing::info!(
            database = %settings.database_name(),
            collection = %settings.collection_name(),
            "Connecting to MongoDB"
        );
        let client = MongoClient::with_uri_str(settings.connection_string())
            .await
            .map_err(|e| {
                tracing::error!("Failed to create MongoDB client: {}", e);
                AppError::from(e)
            })?;
        let db = client.database(settings.database_name());
        let employees = db.collection(settings.collection_name());

        let store = Self {
            client,
            db,
            employees,
        };
        store.health_check().await?;

        tracing::info!(
            database = %settings.database_name(),
            "Successfully connected to MongoDB database"
        );
        Ok(store)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn employees(&self) -> &Collection<EmployeeDocument> {
        &self.employees
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl EmployeeStore for MongoEmployeeStore {
    async fn list_all(&self) -> Result<Vec<Employee>, AppError> {
        let result = match self.employees.find(doc! {}, None).await {
            Ok(cursor) => cursor.try_collect::<Vec<EmployeeDocument>>().await,
            Err(e) => Err(e),
        };
        record_store_call("list_all", result.is_ok());

        let documents = result.map_err(|e| {
            tracing::error!("Failed to list employees: {}", e);
            AppError::from(e)
        })?;

        Ok(documents.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, AppError> {
        let Some(oid) = parse_employee_id(id) else {
            tracing::debug!(employee_id = %id, "Lookup with non-ObjectId id matches nothing");
            return Ok(None);
        };

        let result = self.employees.find_one(doc! { "_id": oid }, None).await;
        record_store_call("find_by_id", result.is_ok());

        let document = result.map_err(|e| {
            tracing::error!(employee_id = %id, "Failed to find employee: {}", e);
            AppError::from(e)
        })?;

        Ok(document.map(Employee::from))
    }

    async fn create(&self, employee: Employee) -> Result<Employee, AppError> {
        let document = EmployeeDocument::try_from(employee)?;

        let result = self.employees.insert_one(&document, None).await;
        record_store_call("create", result.is_ok());

        result.map_err(|e| {
            if is_duplicate_key(&e) {
                tracing::warn!(employee_id = %document.id, "Duplicate employee id on insert");
                AppError::Conflict(anyhow::anyhow!(
                    "Employee with Id = {} already exists",
                    document.id.to_hex()
                ))
            } else {
                tracing::error!(employee_id = %document.id, "Failed to insert employee: {}", e);
                AppError::from(e)
            }
        })?;

        tracing::info!(employee_id = %document.id, "Employee created");
        Ok(Employee::from(document))
    }

    async fn replace(&self, id: &str, employee: Employee) -> Result<(), AppError> {
        let Some(oid) = parse_employee_id(id) else {
            return Ok(());
        };
        let document = EmployeeDocument::with_id(oid, employee);

        let result = self
            .employees
            .replace_one(doc! { "_id": oid }, &document, None)
            .await;
        record_store_call("replace", result.is_ok());

        let outcome = result.map_err(|e| {
            tracing::error!(employee_id = %id, "Failed to replace employee: {}", e);
            AppError::from(e)
        })?;

        if outcome.matched_count == 0 {
            tracing::debug!(employee_id = %id, "Replace matched no employee");
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        let Some(oid) = parse_employee_id(id) else {
            return Ok(());
        };

        let result = self.employees.delete_one(doc! { "_id": oid }, None).await;
        record_store_call("delete_by_id", result.is_ok());

        let outcome = result.map_err(|e| {
            tracing::error!(employee_id = %id, "Failed to delete employee: {}", e);
            AppError::from(e)
        })?;

        if outcome.deleted_count == 0 {
            tracing::debug!(employee_id = %id, "Delete matched no employee");
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
