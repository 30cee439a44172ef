//! Configuration types for registry-visibility
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::util::SecretString;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Kubernetes API access for namespace policies
    pub orchestrator: OrchestratorConfig,

    /// Snapshot store settings
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
        }
    }
}

/// Orchestrator (Kubernetes API) client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Service account bearer token (prefer env var ORCHESTRATOR_TOKEN)
    pub token: Option<SecretString>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Whether to verify TLS certificates of the API server
    pub verify_ssl: bool,

    /// Namespace holding the policy ConfigMap
    pub config_namespace: String,

    /// Name of the ConfigMap holding namespace access policies
    pub config_map: String,

    /// Key inside the ConfigMap data holding the JSON policies
    pub policies_key: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            token: None,
            timeout_secs: 10,
            verify_ssl: true,
            config_namespace: "portainer".to_string(),
            config_map: "portainer-config".to_string(),
            policies_key: "NamespaceAccessPolicies".to_string(),
        }
    }
}

/// Snapshot store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding users, team memberships, endpoints and registries
    pub snapshot_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "snapshot.json".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
