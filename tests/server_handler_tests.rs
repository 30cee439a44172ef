//! HTTP handler tests
//!
//! Drives the router in-process against a snapshot store and a mocked
//! Kubernetes API, checking status codes and response bodies.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use registry_visibility::access_control::EndpointId;
use registry_visibility::auth::USER_ID_HEADER;
use registry_visibility::config::OrchestratorConfig;
use registry_visibility::error::{StoreError, StoreResult};
use registry_visibility::orchestrator::KubeClientFactory;
use registry_visibility::registry::{Endpoint, Registry};
use registry_visibility::store::{EndpointStore, RegistryStore, SnapshotStore};
use registry_visibility::{AppState, router};

const CONFIG_MAP_PATH: &str = "/api/v1/namespaces/portainer/configmaps/portainer-config";

/// Users: 1 admin, 2 dev (team 7), 3 ops.
/// Endpoints: 1 docker, 5 kubernetes (mock server), 6 kubernetes without URL.
fn snapshot(cluster_url: &str) -> Value {
    json!({
        "Users": [
            {"Id": 1, "Username": "admin", "Role": 1},
            {"Id": 2, "Username": "dev", "Role": 2},
            {"Id": 3, "Username": "ops", "Role": 2}
        ],
        "TeamMemberships": [
            {"Id": 1, "UserID": 2, "TeamID": 7, "Role": 2}
        ],
        "Endpoints": [
            {"Id": 1, "Name": "local", "Type": 1},
            {"Id": 5, "Name": "cluster", "Type": 5, "URL": cluster_url},
            {"Id": 6, "Name": "edge-cluster", "Type": 7}
        ],
        "Registries": [
            {
                "Id": 1,
                "Name": "harbor",
                "URL": "harbor.example.com",
                "Authentication": true,
                "Username": "robot",
                "Password": "s3cret",
                "ManagementConfiguration": {"Type": 3, "Password": "admin-pass"},
                "RegistryAccesses": {
                    "1": {"TeamAccessPolicies": {"7": {"RoleId": 0}}},
                    "5": {"Namespaces": ["ns-a"]}
                }
            },
            {
                "Id": 2,
                "Name": "quay",
                "Password": "other",
                "RegistryAccesses": {}
            },
            {
                "Id": 3,
                "Name": "ghcr",
                "RegistryAccesses": {
                    "1": {"UserAccessPolicies": {"3": {"RoleId": 0}}},
                    "5": {"Namespaces": ["default"]}
                }
            }
        ]
    })
}

async fn mock_cluster() -> MockServer {
    let mock_server = MockServer::start().await;

    let policies = json!({
        "ns-a": {"TeamAccessPolicies": {"7": {"RoleId": 0}}},
        "ns-b": {"UserAccessPolicies": {"3": {"RoleId": 0}}}
    });
    Mock::given(method("GET"))
        .and(path(CONFIG_MAP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"NamespaceAccessPolicies": policies.to_string()}
        })))
        .mount(&mock_server)
        .await;

    mock_server
}

fn store(cluster_url: &str) -> Arc<SnapshotStore> {
    Arc::new(SnapshotStore::from_json(&snapshot(cluster_url).to_string()).unwrap())
}

fn clients() -> Arc<KubeClientFactory> {
    Arc::new(KubeClientFactory::new(OrchestratorConfig {
        timeout_secs: 5,
        ..Default::default()
    }))
}

fn app(cluster_url: &str) -> Router {
    router(AppState::from_store(store(cluster_url), clients()))
}

/// Store whose endpoint and registry reads always fail
struct UnavailableStore;

#[async_trait]
impl EndpointStore for UnavailableStore {
    async fn endpoint(&self, _id: EndpointId) -> StoreResult<Endpoint> {
        Err(StoreError::Unavailable("database is locked".into()))
    }
}

#[async_trait]
impl RegistryStore for UnavailableStore {
    async fn registries(&self) -> StoreResult<Vec<Registry>> {
        Err(StoreError::Unavailable("database is locked".into()))
    }
}

async fn get(app: Router, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().uri(uri);
    if let Some(user) = user {
        request = request.header(USER_ID_HEADER, user);
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["Name"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Successful listings
// =============================================================================

#[tokio::test]
async fn test_admin_lists_everything_redacted() {
    let cluster = mock_cluster().await;
    let (status, body) = get(app(&cluster.uri()), "/endpoints/5/registries", Some("1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["harbor", "quay", "ghcr"]);
    for registry in body.as_array().unwrap() {
        assert_eq!(registry["Password"], "");
        assert!(registry["ManagementConfiguration"].is_null());
        assert!(registry["RegistryAccesses"].is_object());
    }
    assert!(!body.to_string().contains("s3cret"));
    assert!(!body.to_string().contains("admin-pass"));
}

#[tokio::test]
async fn test_team_member_lists_namespace_registries() {
    let cluster = mock_cluster().await;
    let (status, body) = get(
        app(&cluster.uri()),
        "/endpoints/5/registries?namespace=ns-a",
        Some("2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["harbor"]);
    assert_eq!(body[0]["Id"], 1);
    assert_eq!(body[0]["Password"], "");
    assert!(body[0]["RegistryAccesses"].is_null());
}

#[tokio::test]
async fn test_authorized_namespace_without_registries() {
    let cluster = mock_cluster().await;
    let (status, body) = get(
        app(&cluster.uri()),
        "/endpoints/5/registries?namespace=ns-b",
        Some("3"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_default_namespace_needs_no_cluster() {
    // Endpoint 6 has no API URL: any cluster call would fail
    let (status, body) = get(
        app("http://127.0.0.1:1"),
        "/endpoints/6/registries?namespace=default",
        Some("3"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let cluster = mock_cluster().await;
    let (status, body) = get(
        app(&cluster.uri()),
        "/endpoints/5/registries?namespace=default",
        Some("3"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["ghcr"]);
}

#[tokio::test]
async fn test_docker_endpoint_uses_registry_policies() {
    let (status, body) = get(
        app("http://127.0.0.1:1"),
        "/endpoints/1/registries?namespace=ignored",
        Some("2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["harbor"]);

    let (status, body) = get(app("http://127.0.0.1:1"), "/endpoints/1/registries", Some("3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["ghcr"]);
}

#[tokio::test]
async fn test_repeated_namespace_on_docker_endpoint_is_ignored() {
    let (status, body) = get(
        app("http://127.0.0.1:1"),
        "/endpoints/1/registries?namespace=a&namespace=b",
        Some("3"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["ghcr"]);
}

#[tokio::test]
async fn test_repeated_namespace_uses_first_value() {
    let cluster = mock_cluster().await;

    let (status, body) = get(
        app(&cluster.uri()),
        "/endpoints/5/registries?namespace=ns-a&namespace=ns-b",
        Some("2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["harbor"]);

    let (status, body) = get(
        app(&cluster.uri()),
        "/endpoints/5/registries?namespace=ns-b&namespace=ns-a",
        Some("2"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User is not authorized to use namespace");
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_unauthorized_namespace_is_forbidden() {
    let cluster = mock_cluster().await;
    let (status, body) = get(
        app(&cluster.uri()),
        "/endpoints/5/registries?namespace=ns-b",
        Some("2"),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User is not authorized to use namespace");
}

#[tokio::test]
async fn test_unknown_namespace_is_forbidden() {
    let cluster = mock_cluster().await;
    let (status, _) = get(
        app(&cluster.uri()),
        "/endpoints/5/registries?namespace=kube-system",
        Some("2"),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_failed_namespace_check_is_not_found() {
    // Endpoint 6 has no API URL, so no client can be built
    let (status, body) = get(
        app("http://127.0.0.1:1"),
        "/endpoints/6/registries?namespace=ns-a",
        Some("2"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Unable to check for namespace authorization");
}

#[tokio::test]
async fn test_cluster_error_is_not_found() {
    let cluster = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONFIG_MAP_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&cluster)
        .await;

    let (status, _) = get(
        app(&cluster.uri()),
        "/endpoints/5/registries?namespace=ns-a",
        Some("2"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_identity_is_internal_error() {
    let (status, body) = get(app("http://127.0.0.1:1"), "/endpoints/1/registries", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Unable to retrieve info from request context");
}

#[tokio::test]
async fn test_unknown_user_is_internal_error() {
    let (status, _) = get(app("http://127.0.0.1:1"), "/endpoints/1/registries", Some("42")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_malformed_endpoint_id_is_bad_request() {
    let (status, body) = get(
        app("http://127.0.0.1:1"),
        "/endpoints/abc/registries",
        Some("1"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid endpoint identifier route variable");
}

#[tokio::test]
async fn test_unknown_endpoint_is_not_found() {
    let (status, _) = get(app("http://127.0.0.1:1"), "/endpoints/99/registries", Some("1")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_endpoint_store_failure_is_internal_error() {
    let snapshot = store("http://127.0.0.1:1");
    let state = AppState::new(
        snapshot.clone(),
        Arc::new(UnavailableStore),
        snapshot,
        clients(),
    );

    let (status, body) = get(router(state), "/endpoints/1/registries", Some("1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Unable to find an endpoint with the specified identifier inside the database"
    );
    assert!(body["details"].as_str().unwrap().contains("database is locked"));
}

#[tokio::test]
async fn test_registry_store_failure_is_internal_error() {
    let snapshot = store("http://127.0.0.1:1");
    let state = AppState::new(
        snapshot.clone(),
        snapshot,
        Arc::new(UnavailableStore),
        clients(),
    );

    let (status, body) = get(router(state), "/endpoints/1/registries", Some("1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Unable to retrieve registries from the database"
    );
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app("http://127.0.0.1:1"), "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
