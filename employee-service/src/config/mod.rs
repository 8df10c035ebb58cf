use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Source of the three values the employee store is built from.
///
/// [`EmployeeDatabaseConfig`] reads them from the process environment; any
/// other source can be plugged into
/// [`MongoEmployeeStore::connect`](crate::services::MongoEmployeeStore::connect)
/// by implementing this trait.
pub trait EmployeeDatabaseSettings: Send + Sync {
    fn collection_name(&self) -> &str;
    fn connection_string(&self) -> &str;
    fn database_name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct EmployeeConfig {
    pub common: core_config::Config,
    pub database: EmployeeDatabaseConfig,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmployeeDatabaseConfig {
    pub collection_name: String,
    pub connection_string: String,
    pub database_name: String,
}

impl EmployeeDatabaseSettings for EmployeeDatabaseConfig {
    fn collection_name(&self) -> &str {
        &self.collection_name
    }

    fn connection_string(&self) -> &str {
        &self.connection_string
    }

    fn database_name(&self) -> &str {
        &self.database_name
    }
}

impl EmployeeConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(EmployeeConfig {
            common: common_config,
            database: EmployeeDatabaseConfig {
                collection_name: get_env("MONGODB_COLLECTION", Some("Employees"), is_prod)?,
                connection_string: get_env("MONGODB_URI", None, is_prod)?,
                database_name: get_env("MONGODB_DATABASE", Some("employee_db"), is_prod)?,
            },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_prefers_set_value() {
        env::set_var("EMPLOYEE_CFG_TEST_SET", "from-env");
        let value = get_env("EMPLOYEE_CFG_TEST_SET", Some("fallback"), true).unwrap();
        assert_eq!(value, "from-env");
    }

    #[test]
    fn get_env_uses_default_outside_prod() {
        let value = get_env("EMPLOYEE_CFG_TEST_UNSET_DEV", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_value_in_prod_even_with_default() {
        let err = get_env("EMPLOYEE_CFG_TEST_UNSET_PROD", Some("fallback"), true).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        let err = get_env("EMPLOYEE_CFG_TEST_UNSET_NODEFAULT", None, false).unwrap_err();
        assert!(err.to_string().contains("EMPLOYEE_CFG_TEST_UNSET_NODEFAULT"));
    }

    #[test]
    fn database_config_exposes_settings() {
        let config = EmployeeDatabaseConfig {
            collection_name: "Employees".to_string(),
            connection_string: "mongodb://localhost:27017".to_string(),
            database_name: "employee_db".to_string(),
        };
        let settings: &dyn EmployeeDatabaseSettings = &config;

        assert_eq!(settings.collection_name(), "Employees");
        assert_eq!(settings.connection_string(), "mongodb://localhost:27017");
        assert_eq!(settings.database_name(), "employee_db");
    }
}
