//! Field redaction
//!
//! Credentials and management settings never leave the service. Access
//! policies are only shown to administrators.

use crate::access_control::types::Privilege;
use crate::registry::types::Registry;

/// Build the outgoing copy of a registry for a caller
///
/// The result is a fresh value: the credential and management configuration
/// are never copied, and the access map is copied only for administrators.
pub fn redact(registry: &Registry, privilege: Privilege) -> Registry {
    Registry {
        id: registry.id,
        name: registry.name.clone(),
        kind: registry.kind,
        url: registry.url.clone(),
        base_url: registry.base_url.clone(),
        authentication: registry.authentication,
        username: registry.username.clone(),
        password: Default::default(),
        management_configuration: None,
        registry_accesses: if privilege.hides_access_policies() {
            None
        } else {
            registry.registry_accesses.clone()
        },
    }
}
