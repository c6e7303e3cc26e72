// storefront-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory calls

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

use crate::{ClientError, ClientResult};

use super::http::{HttpClient, Query, error_from_status, path_with_query};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum `Router` through tower's `oneshot`, so a backend living in
/// the same process answers exactly as it would over the network.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use storefront_client::OneshotHttpClient;
///
/// let router: Router = backend_routes().with_state(state);
/// let client = OneshotHttpClient::new(router);
///
/// let response: UserInfoResponse = client.get("/api/user/info").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Arc<Router>,
}

impl OneshotHttpClient {
    /// `router` must already have its state attached
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    fn build_request(
        &self,
        method: http::Method,
        path: &str,
        body: Body,
    ) -> ClientResult<Request<Body>> {
        Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let router = self.router.as_ref().clone();

        let response = router
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(error_from_status(status, text));
        }

        serde_json::from_slice(&body_bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::GET, path, Body::empty())?;
        self.execute(request).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> ClientResult<T> {
        let path = path_with_query(path, query)?;
        self.get(&path).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body_bytes = serde_json::to_vec(body)?;
        let request = self.build_request(http::Method::POST, path, Body::from(body_bytes))?;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{Json, http::StatusCode};

    #[tokio::test]
    async fn test_oneshot_roundtrip_and_errors() {
        let router: Router = Router::new()
            .route("/ok", get(|| async { Json(serde_json::json!({ "value": 3 })) }))
            .route(
                "/reject",
                get(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(serde_json::json!({ "success": false, "error": "Insufficient stock" })),
                    )
                }),
            );
        let client = OneshotHttpClient::new(router);

        let value: serde_json::Value = client.get("/ok").await.unwrap();
        assert_eq!(value["value"], 3);

        let err = client.get::<serde_json::Value>("/reject").await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected(msg) if msg == "Insufficient stock"));

        let err = client.get::<serde_json::Value>("/missing").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }
}
