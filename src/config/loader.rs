//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (REGISTRY_VISIBILITY_*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "registry-visibility.toml",
    ".registry-visibility.toml",
    "~/.config/registry-visibility/config.toml",
    "/etc/registry-visibility/config.toml",
];

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "REGISTRY_VISIBILITY";

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Defaults come from serde defaults on AppConfig

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Environment variables, e.g. REGISTRY_VISIBILITY_SERVER__PORT
    // Double underscore (__) maps to nested keys (server.port)
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. Conventional token variable for the orchestrator service account
    if let Ok(token) = std::env::var("ORCHESTRATOR_TOKEN")
        && !token.is_empty()
    {
        builder = builder
            .set_override("orchestrator.token", token)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Invalid {
            message: "server.port must be greater than 0".to_string(),
        });
    }

    if config.orchestrator.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            message: "orchestrator.timeout_secs must be greater than 0".to_string(),
        });
    }

    for (field, value) in [
        ("orchestrator.config_namespace", &config.orchestrator.config_namespace),
        ("orchestrator.config_map", &config.orchestrator.config_map),
        ("orchestrator.policies_key", &config.orchestrator.policies_key),
        ("store.snapshot_path", &config.store.snapshot_path),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Missing {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}
