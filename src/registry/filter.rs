//! Registry visibility filter
//!
//! Selects the registries a caller may see on an environment:
//! - Kubernetes environments are scoped by namespace. The caller must be
//!   allowed to use the namespace, and a registry is visible when its access
//!   configuration for the environment lists that namespace.
//! - Other environments are scoped by the registry's user and team policies
//!   for the environment.
//!
//! Administrators see every registry. Input order is preserved.

use crate::access_control::evaluator::authorized_for;
use crate::access_control::namespace::NamespaceAuthorizer;
use crate::access_control::types::{EndpointId, Privilege, TeamMembership, UserId};
use crate::error::VisibilityError;
use crate::registry::redact::redact;
use crate::registry::types::{Endpoint, Registry};
use tracing::debug;

/// Everything known about the caller and target of one decision
#[derive(Debug, Clone, Copy)]
pub struct VisibilityRequest<'a> {
    pub endpoint: &'a Endpoint,
    /// Target namespace, empty when none was given
    pub namespace: &'a str,
    pub user_id: UserId,
    pub memberships: &'a [TeamMembership],
    pub privilege: Privilege,
}

/// Registry visibility filter with its namespace authorization collaborator
#[derive(Clone)]
pub struct RegistryFilter {
    namespaces: NamespaceAuthorizer,
}

impl RegistryFilter {
    pub fn new(namespaces: NamespaceAuthorizer) -> Self {
        Self { namespaces }
    }

    /// Select the registries visible to the caller, without redaction
    pub async fn filter<'r>(
        &self,
        registries: &'r [Registry],
        request: &VisibilityRequest<'_>,
    ) -> Result<Vec<&'r Registry>, VisibilityError> {
        let endpoint = request.endpoint;

        if request.privilege.is_administrator() {
            debug!(endpoint = %endpoint.id, "Administrator sees all registries");
            return Ok(registries.iter().collect());
        }

        if endpoint.kind.is_kubernetes() {
            let authorized = self
                .namespaces
                .is_namespace_authorized(
                    endpoint,
                    request.namespace,
                    request.user_id,
                    request.memberships,
                )
                .await?;

            if !authorized {
                return Err(VisibilityError::Forbidden {
                    namespace: request.namespace.to_string(),
                });
            }

            return Ok(filter_by_namespace(
                registries,
                endpoint.id,
                request.namespace,
            ));
        }

        Ok(filter_by_access(
            registries,
            endpoint.id,
            request.user_id,
            request.memberships,
        ))
    }

    /// Select and redact the registries visible to the caller
    ///
    /// Every returned value is a fresh copy owned by the caller.
    pub async fn visible_registries(
        &self,
        registries: &[Registry],
        request: &VisibilityRequest<'_>,
    ) -> Result<Vec<Registry>, VisibilityError> {
        let visible = self.filter(registries, request).await?;

        debug!(
            endpoint = %request.endpoint.id,
            privilege = %request.privilege,
            total = registries.len(),
            visible = visible.len(),
            "Filtered registries"
        );

        Ok(visible
            .into_iter()
            .map(|registry| redact(registry, request.privilege))
            .collect())
    }
}

/// Registries whose access configuration for the environment lists `namespace`
pub fn filter_by_namespace<'r>(
    registries: &'r [Registry],
    endpoint_id: EndpointId,
    namespace: &str,
) -> Vec<&'r Registry> {
    registries
        .iter()
        .filter(|registry| {
            registry
                .access_for(endpoint_id)
                .is_some_and(|access| access.allows_namespace(namespace))
        })
        .collect()
}

/// Registries whose user or team policies for the environment grant the user access
pub fn filter_by_access<'r>(
    registries: &'r [Registry],
    endpoint_id: EndpointId,
    user_id: UserId,
    memberships: &[TeamMembership],
) -> Vec<&'r Registry> {
    registries
        .iter()
        .filter(|registry| {
            registry
                .access_for(endpoint_id)
                .is_some_and(|access| authorized_for(user_id, memberships, access))
        })
        .collect()
}
