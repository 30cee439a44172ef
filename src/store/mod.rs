//! Store module
//!
//! Read-only access to users, team memberships, environments and registries.
//! The service never writes through these traits.

pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotStore};

use crate::access_control::types::{EndpointId, TeamMembership, User, UserId};
use crate::error::StoreResult;
use crate::registry::types::{Endpoint, Registry};
// async_trait required for dyn-compatibility with Arc<dyn UserStore> and friends
use async_trait::async_trait;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user; `StoreError::NotFound` when it does not exist
    async fn user(&self, id: UserId) -> StoreResult<User>;

    /// Team memberships of a user (empty when the user is in no team)
    async fn team_memberships(&self, user_id: UserId) -> StoreResult<Vec<TeamMembership>>;
}

#[async_trait]
pub trait EndpointStore: Send + Sync {
    /// Look up an environment; `StoreError::NotFound` when it does not exist
    async fn endpoint(&self, id: EndpointId) -> StoreResult<Endpoint>;
}

#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// All configured registries, in storage order
    async fn registries(&self) -> StoreResult<Vec<Registry>>;
}
