//! Authentication context module
//!
//! Turns an identity established upstream into the security context used by
//! authorization decisions.

pub mod context;
pub mod middleware;

pub use context::SecurityContext;
pub use middleware::{USER_ID_HEADER, resolve_security_context, user_id_from_headers};
