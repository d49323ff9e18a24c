//! [`RemoteSource`] over the hostel backend's JSON REST API.

use crate::config::ApiConfig;
use crate::framework::SourceError;
use crate::sources::{PageMeta, RemotePage, RemoteQuery, RemoteSource};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, instrument};

/// Placeholder in an endpoint path that is replaced by the query scope.
pub const SCOPE_PLACEHOLDER: &str = "{scope}";

/// `GET {base_url}{path}?{filters}&page=&limit=` returning either an envelope
/// `{"<items_key>": [...], "meta": {...}}` or a bare JSON array.
pub struct HttpSource<T> {
    http: Client,
    base_url: String,
    path: String,
    items_key: &'static str,
    token: Option<String>,
    _record: PhantomData<fn() -> T>,
}

impl<T> HttpSource<T> {
    pub fn new(api: &ApiConfig, path: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api, path)
    }

    pub fn with_client(http: Client, api: &ApiConfig, path: impl Into<String>) -> Self {
        Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            path: path.into(),
            items_key: "data",
            token: api.token.clone(),
            _record: PhantomData,
        }
    }

    /// Envelope key holding the records (defaults to `data`).
    pub fn items_key(mut self, key: &'static str) -> Self {
        self.items_key = key;
        self
    }

    fn url(&self, scope: Option<&str>) -> Result<String, SourceError> {
        let path = if self.path.contains(SCOPE_PLACEHOLDER) {
            let scope = scope
                .ok_or_else(|| SourceError::Transport(format!("{} needs a scope", self.path)))?;
            self.path.replace(SCOPE_PLACEHOLDER, scope)
        } else {
            self.path.clone()
        };
        Ok(format!("{}{}", self.base_url, path))
    }
}

#[async_trait]
impl<T> RemoteSource<T> for HttpSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    #[instrument(skip(self), fields(path = %self.path))]
    async fn query(&self, query: &RemoteQuery) -> Result<RemotePage<T>, SourceError> {
        let url = self.url(query.scope.as_deref())?;
        let mut request = self.http.get(url).query(&query.to_pairs());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let body: Value = request.send().await?.error_for_status()?.json().await?;
        let page = decode_envelope(body, self.items_key)?;
        debug!(items = page.items.len(), meta = ?page.meta, "Page received");
        Ok(page)
    }
}

/// Splits a response body into records and page totals. A missing items key is
/// an empty page, not an error.
pub fn decode_envelope<T: DeserializeOwned>(
    body: Value,
    items_key: &str,
) -> Result<RemotePage<T>, SourceError> {
    match body {
        Value::Array(_) => Ok(RemotePage::new(serde_json::from_value(body)?, None)),
        Value::Object(mut envelope) => {
            let items = match envelope.remove(items_key) {
                Some(Value::Null) | None => Vec::new(),
                Some(items) => serde_json::from_value(items)?,
            };
            let meta = envelope
                .remove("meta")
                .filter(|meta| !meta.is_null())
                .map(serde_json::from_value::<PageMeta>)
                .transpose()?;
            Ok(RemotePage::new(items, meta))
        }
        other => Err(SourceError::Decode(format!(
            "expected an object or array, got {other}"
        ))),
    }
}
