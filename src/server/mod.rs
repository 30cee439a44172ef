//! HTTP server module
//!
//! Shared state and routing for the registry listing API.

pub mod handler;

pub use handler::{endpoint_registries_list, health};

use crate::access_control::NamespaceAuthorizer;
use crate::auth::resolve_security_context;
use crate::orchestrator::SharedClientFactory;
use crate::registry::RegistryFilter;
use crate::store::{EndpointStore, RegistryStore, UserStore};
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Collaborators shared by all requests
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub endpoints: Arc<dyn EndpointStore>,
    pub registries: Arc<dyn RegistryStore>,
    pub filter: RegistryFilter,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        endpoints: Arc<dyn EndpointStore>,
        registries: Arc<dyn RegistryStore>,
        clients: SharedClientFactory,
    ) -> Self {
        Self {
            users,
            endpoints,
            registries,
            filter: RegistryFilter::new(NamespaceAuthorizer::new(clients)),
        }
    }

    /// State backed by a single store implementing every store trait
    pub fn from_store<S>(store: Arc<S>, clients: SharedClientFactory) -> Self
    where
        S: UserStore + EndpointStore + RegistryStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store, clients)
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    info!("Building registry visibility router");

    Router::new()
        .route("/endpoints/{id}/registries", get(endpoint_registries_list))
        .route("/health", get(health))
        .layer(from_fn_with_state(
            state.users.clone(),
            resolve_security_context,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
