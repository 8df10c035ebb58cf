//! Application startup and lifecycle management.

use crate::build_router;
use crate::config::EmployeeConfig;
use crate::services::{EmployeeStore, MongoEmployeeStore};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state. The store is built once per process and shared
/// read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    store: MongoEmployeeStore,
}

impl Application {
    /// Connect to MongoDB and bind the HTTP listener.
    ///
    /// An unreachable store fails the build; there is no retry.
    pub async fn build(config: EmployeeConfig) -> Result<Self, AppError> {
        let store = MongoEmployeeStore::connect(&config.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

        // Port 0 picks a random port (used by tests)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Employee service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            store,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> &MongoEmployeeStore {
        &self.store
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let state = AppState::new(Arc::new(self.store));
        let router = build_router(state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
