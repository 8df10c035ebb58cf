use employee_service::config::EmployeeConfig;
use employee_service::services::MongoEmployeeStore;
use employee_service::startup::Application;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: MongoEmployeeStore,
    pub db_name: String,
}

impl TestApp {
    /// Spawn the service on a random port against a throwaway database.
    pub async fn spawn() -> Self {
        dotenvy::dotenv().ok();
        if std::env::var("MONGODB_URI").is_err() {
            std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        }

        let db_name = format!("employee_test_{}", Uuid::new_v4());

        let mut config = EmployeeConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.database.database_name = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            db_name,
        }
    }

    pub fn employees_url(&self) -> String {
        format!("{}/api/employees", self.address)
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        let _ = self
            .store
            .client()
            .database(&self.db_name)
            .drop(None)
            .await;
    }
}
