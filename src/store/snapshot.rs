//! Snapshot-backed store
//!
//! Loads users, team memberships, environments and registries once from a
//! JSON document and serves them read-only.

use crate::access_control::types::{EndpointId, TeamMembership, User, UserId};
use crate::error::{StoreError, StoreResult};
use crate::registry::types::{Endpoint, Registry};
use crate::store::{EndpointStore, RegistryStore, UserStore};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// On-disk snapshot document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub team_memberships: Vec<TeamMembership>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub registries: Vec<Registry>,
}

/// In-memory store built from a [`Snapshot`]
#[derive(Debug, Default)]
pub struct SnapshotStore {
    users: HashMap<UserId, User>,
    memberships: HashMap<UserId, Vec<TeamMembership>>,
    endpoints: HashMap<EndpointId, Endpoint>,
    registries: Vec<Registry>,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        let mut memberships: HashMap<UserId, Vec<TeamMembership>> = HashMap::new();
        for membership in snapshot.team_memberships {
            memberships
                .entry(membership.user_id)
                .or_default()
                .push(membership);
        }

        Self {
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            memberships,
            endpoints: snapshot.endpoints.into_iter().map(|e| (e.id, e)).collect(),
            registries: snapshot.registries,
        }
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    /// Load a snapshot file
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let store = Self::from_json(&json)?;

        info!(
            path = %path.display(),
            users = store.users.len(),
            endpoints = store.endpoints.len(),
            registries = store.registries.len(),
            "Loaded store snapshot"
        );

        Ok(store)
    }
}

#[async_trait]
impl UserStore for SnapshotStore {
    async fn user(&self, id: UserId) -> StoreResult<User> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn team_memberships(&self, user_id: UserId) -> StoreResult<Vec<TeamMembership>> {
        Ok(self.memberships.get(&user_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl EndpointStore for SnapshotStore {
    async fn endpoint(&self, id: EndpointId) -> StoreResult<Endpoint> {
        self.endpoints
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("endpoint", id))
    }
}

#[async_trait]
impl RegistryStore for SnapshotStore {
    async fn registries(&self) -> StoreResult<Vec<Registry>> {
        Ok(self.registries.clone())
    }
}
