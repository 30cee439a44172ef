//! Namespace authorization
//!
//! Decides whether a user may use a namespace on a Kubernetes environment,
//! from the namespace access policies stored on the cluster.

use crate::access_control::evaluator::authorized_for;
use crate::access_control::types::{TeamMembership, UserId};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::orchestrator::SharedClientFactory;
use crate::registry::types::Endpoint;
use tracing::{debug, instrument};

/// Namespace every user may use
pub const DEFAULT_NAMESPACE: &str = "default";

/// Resolves namespace authorization through the orchestrator client factory
#[derive(Clone)]
pub struct NamespaceAuthorizer {
    clients: SharedClientFactory,
}

impl NamespaceAuthorizer {
    pub fn new(clients: SharedClientFactory) -> Self {
        Self { clients }
    }

    /// Check whether `user_id` may use `namespace` on `endpoint`
    ///
    /// A namespace missing from the stored policies is a plain `false`.
    /// Failing to get a client or to fetch the policies is an error and is
    /// not retried.
    #[instrument(skip(self, endpoint, memberships), fields(endpoint = %endpoint.id))]
    pub async fn is_namespace_authorized(
        &self,
        endpoint: &Endpoint,
        namespace: &str,
        user_id: UserId,
        memberships: &[TeamMembership],
    ) -> OrchestratorResult<bool> {
        if namespace == DEFAULT_NAMESPACE {
            return Ok(true);
        }

        let client = self
            .clients
            .get_client(endpoint)
            .await
            .map_err(|e| match e {
                OrchestratorError::ClientUnavailable(_) => e,
                other => OrchestratorError::ClientUnavailable(other.to_string()),
            })?;

        let policies = client
            .namespace_access_policies()
            .await
            .map_err(|e| match e {
                OrchestratorError::PolicyFetchFailed(_) => e,
                other => OrchestratorError::PolicyFetchFailed(other.to_string()),
            })?;

        let Some(policy) = policies.get(namespace) else {
            debug!("Namespace has no access policies");
            return Ok(false);
        };

        Ok(authorized_for(user_id, memberships, policy))
    }
}
