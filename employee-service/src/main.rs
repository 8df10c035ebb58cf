use employee_service::config::EmployeeConfig;
use employee_service::services::init_metrics;
use employee_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Configuration picks the log level, so it loads before the subscriber exists.
    let config = EmployeeConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "employee-service",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    );

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start employee service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
