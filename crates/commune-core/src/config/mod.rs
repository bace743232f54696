mod database;

pub use database::DatabaseConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CommuneError, Result};

/// Deployment environment. Selects secure transport and default log
/// verbosity; everything else is identical across environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Default tracing filter for this environment, overridable via RUST_LOG.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Production => "info",
        }
    }
}

/// Root configuration for COMMUNE.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuneConfig {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,

    /// Database configuration.
    pub database: DatabaseConfig,
}

impl CommuneConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CommuneError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| CommuneError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
            [database]
            username = "commune"
            database = "commune_dev"
        "#;

        let config = CommuneConfig::parse_toml(toml).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database.username, "commune");
    }

    #[test]
    fn test_parse_production_environment() {
        let toml = r#"
            environment = "production"

            [database]
            username = "commune"
            database = "commune"
        "#;

        let config = CommuneConfig::parse_toml(toml).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.environment.default_log_filter(), "info");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COMMUNE_TEST_DB_PASSWORD", "hunter2");

        let toml = r#"
            [database]
            username = "commune"
            password = "${COMMUNE_TEST_DB_PASSWORD}"
            database = "commune_dev"
        "#;

        let config = CommuneConfig::parse_toml(toml).unwrap();
        assert_eq!(config.database.password, "hunter2");
    }

    #[test]
    fn test_unset_env_var_left_verbatim() {
        let content = substitute_env_vars("password = \"${COMMUNE_UNSET_VAR_XYZ}\"");
        assert!(content.contains("${COMMUNE_UNSET_VAR_XYZ}"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = CommuneConfig::from_file("/nonexistent/commune.toml");
        assert!(matches!(result, Err(CommuneError::Config(_))));
    }
}
