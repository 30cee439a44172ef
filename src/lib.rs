//! Registry Visibility Service
//!
//! Decides which configured image registries a user may see on an
//! environment, and strips sensitive fields from the ones returned.
//!
//! ## Features
//!
//! - **Namespace-scoped visibility** on Kubernetes environments, backed by the
//!   namespace access policies stored on the cluster
//! - **User and team scoped visibility** on every other environment type
//! - **Redaction** of credentials and management settings for every caller,
//!   and of access policies for non-administrators
//! - **Flexible configuration** via TOML files and environment variables
//!
//! ## Visibility Model
//!
//! ```text
//! administrator            → every registry
//! kubernetes environment   → namespace allowed? → registries listing the namespace
//! other environment        → registries whose user/team policies include the caller
//! ```
//!
//! ## Example Configuration
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 9000
//!
//! [orchestrator]
//! # token from ORCHESTRATOR_TOKEN env var
//! timeout_secs = 10
//!
//! [store]
//! snapshot_path = "/var/lib/registry-visibility/snapshot.json"
//! ```

pub mod access_control;
pub mod auth;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod server;
pub mod store;
pub mod transport;
pub mod util;

// Re-export main types
pub use config::{AppConfig, load_config};
pub use error::{ApiError, VisibilityError};
pub use registry::{RegistryFilter, VisibilityRequest};
pub use server::{AppState, router};
