//! Registry and environment records
//!
//! Field names follow the wire format of the registry management API
//! (PascalCase, decimal-string map keys).

use crate::access_control::types::{
    EndpointId, PolicyMaps, RegistryId, TeamAccessPolicies, UserAccessPolicies,
};
use crate::util::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Environment type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EndpointType {
    /// Plain container engine
    Docker,
    /// Agent running on a container engine
    AgentOnDocker,
    /// Azure container instances
    Azure,
    /// Edge agent running on a container engine
    EdgeAgentOnDocker,
    /// Local Kubernetes cluster
    KubernetesLocal,
    /// Agent running on Kubernetes
    AgentOnKubernetes,
    /// Edge agent running on Kubernetes
    EdgeAgentOnKubernetes,
}

impl EndpointType {
    /// Whether registry visibility on this environment is scoped by namespace
    pub const fn is_kubernetes(&self) -> bool {
        matches!(
            self,
            EndpointType::KubernetesLocal
                | EndpointType::AgentOnKubernetes
                | EndpointType::EdgeAgentOnKubernetes
        )
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            EndpointType::Docker => "docker",
            EndpointType::AgentOnDocker => "agent_on_docker",
            EndpointType::Azure => "azure",
            EndpointType::EdgeAgentOnDocker => "edge_agent_on_docker",
            EndpointType::KubernetesLocal => "kubernetes_local",
            EndpointType::AgentOnKubernetes => "agent_on_kubernetes",
            EndpointType::EdgeAgentOnKubernetes => "edge_agent_on_kubernetes",
        }
    }

    pub fn all() -> &'static [EndpointType] {
        &[
            EndpointType::Docker,
            EndpointType::AgentOnDocker,
            EndpointType::Azure,
            EndpointType::EdgeAgentOnDocker,
            EndpointType::KubernetesLocal,
            EndpointType::AgentOnKubernetes,
            EndpointType::EdgeAgentOnKubernetes,
        ]
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for EndpointType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EndpointType::Docker),
            2 => Ok(EndpointType::AgentOnDocker),
            3 => Ok(EndpointType::Azure),
            4 => Ok(EndpointType::EdgeAgentOnDocker),
            5 => Ok(EndpointType::KubernetesLocal),
            6 => Ok(EndpointType::AgentOnKubernetes),
            7 => Ok(EndpointType::EdgeAgentOnKubernetes),
            other => Err(format!("unknown endpoint type {}", other)),
        }
    }
}

impl From<EndpointType> for u8 {
    fn from(kind: EndpointType) -> u8 {
        match kind {
            EndpointType::Docker => 1,
            EndpointType::AgentOnDocker => 2,
            EndpointType::Azure => 3,
            EndpointType::EdgeAgentOnDocker => 4,
            EndpointType::KubernetesLocal => 5,
            EndpointType::AgentOnKubernetes => 6,
            EndpointType::EdgeAgentOnKubernetes => 7,
        }
    }
}

/// An environment (endpoint)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "Id")]
    pub id: EndpointId,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: EndpointType,
    /// API address of the environment (Kubernetes API server for orchestrator types)
    #[serde(rename = "URL", default)]
    pub url: String,
}

/// Access configuration of a registry on one environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistryAccessPolicy {
    #[serde(default)]
    pub user_access_policies: UserAccessPolicies,
    #[serde(default)]
    pub team_access_policies: TeamAccessPolicies,
    /// Namespaces the registry may be used from
    #[serde(default)]
    pub namespaces: Vec<String>,
}

impl RegistryAccessPolicy {
    pub fn allows_namespace(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }
}

impl PolicyMaps for RegistryAccessPolicy {
    fn user_policies(&self) -> &UserAccessPolicies {
        &self.user_access_policies
    }

    fn team_policies(&self) -> &TeamAccessPolicies {
        &self.team_access_policies
    }
}

/// Environment id → access configuration
pub type RegistryAccesses = HashMap<EndpointId, RegistryAccessPolicy>;

/// Administrative connection settings of a registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagementConfiguration {
    #[serde(rename = "Type", default)]
    pub kind: u8,
    #[serde(default)]
    pub authentication: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: SecretString,
    #[serde(rename = "TLSConfig", default)]
    pub tls_config: Option<serde_json::Value>,
}

/// A configured image registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "Id")]
    pub id: RegistryId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub kind: u8,
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(rename = "BaseURL", default)]
    pub base_url: String,
    #[serde(rename = "Authentication", default)]
    pub authentication: bool,
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "Password", default)]
    pub password: SecretString,
    #[serde(rename = "ManagementConfiguration", default)]
    pub management_configuration: Option<ManagementConfiguration>,
    #[serde(rename = "RegistryAccesses", default)]
    pub registry_accesses: Option<RegistryAccesses>,
}

impl Registry {
    /// Access configuration for an environment, if the registry is scoped to it
    pub fn access_for(&self, endpoint_id: EndpointId) -> Option<&RegistryAccessPolicy> {
        self.registry_accesses.as_ref()?.get(&endpoint_id)
    }
}
