use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use super::MirrorError;
use crate::models::SharedDocument;

/// Header carrying the static API key when none is configured explicitly.
pub const DEFAULT_AUTH_HEADER: &str = "X-Master-Key";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A remote copy of the whole shared document.
#[async_trait]
pub trait RemoteMirror: Send + Sync {
    async fn fetch_all(&self) -> Result<SharedDocument, MirrorError>;

    async fn replace_all(&self, doc: &SharedDocument) -> Result<(), MirrorError>;

    /// Short description for log lines and status output.
    fn describe(&self) -> String;
}

#[async_trait]
impl RemoteMirror for Box<dyn RemoteMirror> {
    async fn fetch_all(&self) -> Result<SharedDocument, MirrorError> {
        (**self).fetch_all().await
    }

    async fn replace_all(&self, doc: &SharedDocument) -> Result<(), MirrorError> {
        (**self).replace_all(doc).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Mirror backed by a JSON blob endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct HttpMirror {
    client: Client,
    base_url: String,
    auth: Option<(header::HeaderName, header::HeaderValue)>,
}

impl HttpMirror {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MirrorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: None,
        })
    }

    /// Send `value` in header `name` on every request.
    pub fn with_auth(mut self, name: &str, value: &str) -> Result<Self, MirrorError> {
        let name = header::HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| MirrorError::InvalidConfig(format!("auth header name: {}", e)))?;
        let mut value = header::HeaderValue::from_str(value)
            .map_err(|e| MirrorError::InvalidConfig(format!("auth header value: {}", e)))?;
        value.set_sensitive(true);
        self.auth = Some((name, value));
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Some((ref name, ref value)) = self.auth {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, MirrorError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(MirrorError::from_status(status, &body))
        }
    }

    /// Accept either the bare document or the `{"record": ...}` envelope
    /// hosted bin services wrap it in. A null record is an empty document.
    fn parse_latest(body: &str) -> Result<SharedDocument, MirrorError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| MirrorError::InvalidResponse(format!("not JSON: {}", e)))?;

        let doc = match value {
            serde_json::Value::Object(mut obj) => match obj.remove("record") {
                Some(serde_json::Value::Null) => SharedDocument::empty(),
                Some(record) => serde_json::from_value(record)
                    .map_err(|e| MirrorError::InvalidResponse(format!("bad record: {}", e)))?,
                None => serde_json::from_value(serde_json::Value::Object(obj))
                    .map_err(|e| MirrorError::InvalidResponse(format!("bad document: {}", e)))?,
            },
            other => {
                return Err(MirrorError::InvalidResponse(format!(
                    "expected a JSON object, got {}",
                    other
                )))
            }
        };
        Ok(doc)
    }
}

#[async_trait]
impl RemoteMirror for HttpMirror {
    async fn fetch_all(&self) -> Result<SharedDocument, MirrorError> {
        let url = format!("{}/latest", self.base_url);
        debug!(url = %url, "Fetching shared document");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers())
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let body = response.text().await?;

        Self::parse_latest(&body)
    }

    async fn replace_all(&self, doc: &SharedDocument) -> Result<(), MirrorError> {
        debug!(url = %self.base_url, records = doc.total_records(), "Replacing shared document");

        let response = self
            .client
            .put(&self.base_url)
            .headers(self.auth_headers())
            .json(doc)
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Mirror used when no remote is configured: every call is unavailable,
/// so the storage client always runs from the local cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineMirror;

#[async_trait]
impl RemoteMirror for OfflineMirror {
    async fn fetch_all(&self) -> Result<SharedDocument, MirrorError> {
        Err(MirrorError::Offline)
    }

    async fn replace_all(&self, _doc: &SharedDocument) -> Result<(), MirrorError> {
        Err(MirrorError::Offline)
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}
