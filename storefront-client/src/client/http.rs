// storefront-client/src/client/http.rs
// HTTP client - network transport

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use shared::ApiStatus;

use crate::{ClientConfig, ClientError, ClientResult};

/// Query string pairs, in order
pub type Query<'a> = [(&'a str, String)];

/// HTTP client trait
///
/// Paths are absolute (`/api/...`); implementations resolve them against
/// their own origin.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
}

/// Append a URL-encoded query string to `path`
pub(crate) fn path_with_query(path: &str, query: &Query<'_>) -> ClientResult<String> {
    if query.is_empty() {
        return Ok(path.to_string());
    }
    let mut url = Url::parse("http://localhost/")
        .and_then(|base| base.join(path))
        .map_err(|e| ClientError::Internal(format!("Invalid path {path}: {e}")))?;
    url.query_pairs_mut()
        .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(format!("{}?{}", url.path(), url.query().unwrap_or_default()))
}

/// Map a non-2xx response body to an error
///
/// A `{success: false, error}` body is a business rejection whatever the
/// status; anything else is mapped by status code.
pub(crate) fn error_from_status(status: StatusCode, text: String) -> ClientError {
    if let Ok(api_status) = serde_json::from_str::<ApiStatus>(&text) {
        if !api_status.success && api_status.error.is_some() {
            return ClientError::Rejected(api_status.error_message());
        }
    }
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST => ClientError::Validation(text),
        _ => ClientError::Internal(format!("{status}: {text}")),
    }
}

/// Network HTTP client
///
/// Keeps the backend's session cookie between calls.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(error_from_status(status, text));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
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
        let response = self.client.post(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }
}
