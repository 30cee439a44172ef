//! Kubernetes API client
//!
//! Reads namespace access policies from a ConfigMap on the cluster
//! (`portainer/portainer-config`, key `NamespaceAccessPolicies` by default).
//! Requests are not retried; a failure surfaces immediately.

use crate::access_control::types::{EndpointId, NamespaceAccessPolicies};
use crate::config::OrchestratorConfig;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::orchestrator::client::{ClientFactory, OrchestratorClient};
use crate::registry::types::Endpoint;
use crate::util::SecretString;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

/// The subset of a ConfigMap we read
#[derive(Debug, Deserialize)]
struct ConfigMap {
    #[serde(default)]
    data: Option<HashMap<String, String>>,
}

/// Kubernetes API client for one cluster
pub struct KubeClient {
    http: Client,
    base_url: String,
    token: Option<SecretString>,
    config_namespace: String,
    config_map: String,
    policies_key: String,
}

impl KubeClient {
    /// Create a new client for the API server at `base_url`
    pub fn new(base_url: &str, config: &OrchestratorConfig) -> OrchestratorResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(format!("registry-visibility/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OrchestratorError::ClientUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            config_namespace: config.config_namespace.clone(),
            config_map: config.config_map.clone(),
            policies_key: config.policies_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn config_map_url(&self) -> String {
        format!(
            "{}/api/v1/namespaces/{}/configmaps/{}",
            self.base_url, self.config_namespace, self.config_map
        )
    }
}

#[async_trait]
impl OrchestratorClient for KubeClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn namespace_access_policies(&self) -> OrchestratorResult<NamespaceAccessPolicies> {
        let mut request = self.http.get(self.config_map_url());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(config_map = %self.config_map, "Policy ConfigMap not found, no policies stored");
            return Ok(NamespaceAccessPolicies::new());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrchestratorError::from_response(status.as_u16(), &body));
        }

        let config_map: ConfigMap = response.json().await.map_err(|e| {
            OrchestratorError::InvalidResponse(format!("Failed to parse ConfigMap: {}", e))
        })?;

        let Some(raw) = config_map
            .data
            .as_ref()
            .and_then(|data| data.get(&self.policies_key))
        else {
            debug!(key = %self.policies_key, "No namespace access policies stored");
            return Ok(NamespaceAccessPolicies::new());
        };

        let policies: NamespaceAccessPolicies = serde_json::from_str(raw).map_err(|e| {
            OrchestratorError::InvalidResponse(format!(
                "Failed to parse {}: {}",
                self.policies_key, e
            ))
        })?;

        trace!(namespaces = policies.len(), "Fetched namespace access policies");
        Ok(policies)
    }
}

/// Builds one [`KubeClient`] per environment and caches it
pub struct KubeClientFactory {
    config: OrchestratorConfig,
    clients: RwLock<HashMap<EndpointId, Arc<KubeClient>>>,
}

impl KubeClientFactory {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self {
            config,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached clients
    pub async fn cached(&self) -> usize {
        self.clients.read().await.len()
    }
}

#[async_trait]
impl ClientFactory for KubeClientFactory {
    async fn get_client(
        &self,
        endpoint: &Endpoint,
    ) -> OrchestratorResult<Arc<dyn OrchestratorClient>> {
        if endpoint.url.is_empty() {
            return Err(OrchestratorError::ClientUnavailable(format!(
                "endpoint {} has no API URL",
                endpoint.id
            )));
        }
        let base_url = endpoint.url.trim_end_matches('/');

        if let Some(client) = self.clients.read().await.get(&endpoint.id)
            && client.base_url() == base_url
        {
            let client: Arc<dyn OrchestratorClient> = client.clone();
            return Ok(client);
        }

        let client = Arc::new(KubeClient::new(base_url, &self.config)?);
        debug!(endpoint = %endpoint.id, base_url, "Created kubernetes client");
        self.clients
            .write()
            .await
            .insert(endpoint.id, Arc::clone(&client));

        Ok(client)
    }
}
