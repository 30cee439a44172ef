//! Registry module
//!
//! Registry and environment records, the visibility filter, and the field
//! redactor applied to every registry before it is returned.

pub mod filter;
pub mod redact;
pub mod types;

pub use filter::{RegistryFilter, VisibilityRequest, filter_by_access, filter_by_namespace};
pub use redact::redact;
pub use types::{
    Endpoint, EndpointType, ManagementConfiguration, Registry, RegistryAccessPolicy,
    RegistryAccesses,
};
