//! Mock Kubernetes API server for data source tests

use cilium_client::CiliumClient;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use serde_json::json;
use tower_test::mock;

use crate::provider::SharedClient;

pub struct ApiServerMock {
    handle: mock::Handle<Request<Body>, Response<Body>>,
}

/// A configured shared client whose requests are answered by the returned mock.
pub fn mock_shared_client() -> (SharedClient, ApiServerMock) {
    let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
    let client = CiliumClient::new(Client::new(service, "default"), "mock");
    (
        SharedClient::new(tokio::sync::RwLock::new(Some(client))),
        ApiServerMock { handle },
    )
}

impl ApiServerMock {
    /// Answer the next request with a list of `items`. Returns the request
    /// path and query for assertions.
    pub async fn respond_list(&mut self, kind: &str, items: Vec<serde_json::Value>) -> (String, String) {
        let body = json!({
            "apiVersion": "cilium.io/v2",
            "kind": format!("{}List", kind),
            "metadata": {"resourceVersion": "1"},
            "items": items,
        });
        self.respond(200, body).await
    }

    /// Answer the next request with an API error status.
    pub async fn respond_error(&mut self, code: u16, reason: &str, message: &str) -> (String, String) {
        let body = json!({
            "kind": "Status",
            "apiVersion": "v1",
            "metadata": {},
            "status": "Failure",
            "message": message,
            "reason": reason,
            "code": code,
        });
        self.respond(code, body).await
    }

    async fn respond(&mut self, status: u16, body: serde_json::Value) -> (String, String) {
        let (request, send) = self.handle.next_request().await.expect("service not called");
        let path = request.uri().path().to_string();
        let query = request.uri().query().unwrap_or_default().to_string();
        send.send_response(
            Response::builder()
                .status(status)
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        );
        (path, query)
    }
}

pub fn cilium_node(name: &str, instance_id: &str) -> serde_json::Value {
    json!({
        "apiVersion": "cilium.io/v2",
        "kind": "CiliumNode",
        "metadata": {
            "name": name,
            "uid": format!("uid-{}", name),
            "resourceVersion": "42",
            "labels": {"kubernetes.io/os": "linux"}
        },
        "spec": {
            "instance-id": instance_id,
            "addresses": [{"type": "InternalIP", "ip": "172.18.0.2"}]
        }
    })
}

pub fn policy(kind: &str, name: &str, namespace: Option<&str>) -> serde_json::Value {
    let mut metadata = json!({"name": name, "resourceVersion": "7"});
    if let Some(namespace) = namespace {
        metadata["namespace"] = json!(namespace);
    }
    json!({
        "apiVersion": "cilium.io/v2",
        "kind": kind,
        "metadata": metadata,
        "spec": {"endpointSelector": {"matchLabels": {"app": name}}}
    })
}
