//! Orchestrator client traits
//!
//! The namespace authorization resolver only needs two things from the
//! orchestrator: a client per environment, and the namespace access policies
//! that client can read.

use crate::access_control::types::NamespaceAccessPolicies;
use crate::error::OrchestratorResult;
use crate::registry::types::Endpoint;
// async_trait required for dyn-compatibility with Arc<dyn ClientFactory>
use async_trait::async_trait;
use std::sync::Arc;

/// Client bound to one orchestrator environment
#[async_trait]
pub trait OrchestratorClient: Send + Sync {
    /// Fetch the namespace → access policy map of the environment
    ///
    /// An environment with no stored policies yields an empty map.
    async fn namespace_access_policies(&self) -> OrchestratorResult<NamespaceAccessPolicies>;
}

/// Produces (and may cache) clients for environments
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn get_client(
        &self,
        endpoint: &Endpoint,
    ) -> OrchestratorResult<Arc<dyn OrchestratorClient>>;
}

/// Shared client factory handle
pub type SharedClientFactory = Arc<dyn ClientFactory>;
