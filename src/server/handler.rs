//! HTTP handlers
//!
//! `GET /endpoints/{id}/registries` lists the registries the caller may use
//! on an environment, redacted for the caller.

use crate::auth::SecurityContext;
use crate::error::ApiError;
use crate::registry::{Registry, VisibilityRequest};
use crate::server::AppState;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Path, Query, State};
use serde::Serialize;
use tracing::{debug, instrument};

/// Raw query string pairs, in request order and with repeats kept
pub type QueryPairs = Vec<(String, String)>;

/// Query parameter naming the target namespace
pub const NAMESPACE_PARAM: &str = "namespace";

/// First value of `name` in the query, if any
pub fn first_param<'q>(pairs: &'q [(String, String)], name: &str) -> Option<&'q str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness check
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// List the registries visible to the caller on an environment
#[instrument(skip_all, fields(endpoint = %raw_id))]
pub async fn endpoint_registries_list(
    State(state): State<AppState>,
    context: Option<Extension<SecurityContext>>,
    Path(raw_id): Path<String>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<Registry>>, ApiError> {
    let Some(Extension(context)) = context else {
        return Err(ApiError::internal(
            "Unable to retrieve info from request context",
            "no security context attached to request",
        ));
    };

    let user = state.users.user(context.user_id).await.map_err(|e| {
        ApiError::internal("Unable to retrieve user from the database", e)
    })?;

    let endpoint_id = raw_id.parse::<u32>().map_err(|e| {
        ApiError::bad_input("Invalid endpoint identifier route variable", e)
    })?;

    let endpoint = state
        .endpoints
        .endpoint(endpoint_id.into())
        .await
        .map_err(|e| {
            let message = "Unable to find an endpoint with the specified identifier inside the database";
            if e.is_not_found() {
                ApiError::not_found(message, e)
            } else {
                ApiError::internal(message, e)
            }
        })?;

    let registries = state.registries.registries().await.map_err(|e| {
        ApiError::internal("Unable to retrieve registries from the database", e)
    })?;

    // The query is only read for Kubernetes environments
    let namespace = if endpoint.kind.is_kubernetes() {
        let Query(pairs) = query
            .map_err(|e| ApiError::bad_input("Invalid query parameter: namespace", e))?;
        first_param(&pairs, NAMESPACE_PARAM)
            .unwrap_or_default()
            .to_string()
    } else {
        String::new()
    };

    let request = VisibilityRequest {
        endpoint: &endpoint,
        namespace: &namespace,
        user_id: user.id,
        memberships: &context.memberships,
        privilege: context.privilege(),
    };

    let visible = state
        .filter
        .visible_registries(&registries, &request)
        .await?;

    debug!(
        user = %user.id,
        kind = %endpoint.kind,
        namespace = %namespace,
        count = visible.len(),
        "Listing registries"
    );

    Ok(Json(visible))
}
