use std::sync::Arc;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value, json};
use taskbridge_core::config::RemoteConfig;
use taskbridge_core::error::GatewayError;
use taskbridge_core::normalize::{clean_payload, normalize_query};

use crate::util::client;

/// One outbound call, built fresh per invocation.
#[derive(Debug, Clone)]
pub struct RemoteRequest {
    pub method: Method,
    segments: Vec<String>,
    pub body: Option<Map<String, Value>>,
    pub query: Vec<(String, String)>,
}

impl RemoteRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PUT, segments)
    }

    /// Query parameters go through [`normalize_query`].
    pub fn with_query(mut self, params: Map<String, Value>) -> Self {
        self.query = normalize_query(params);
        self
    }

    /// Bodies go through [`clean_payload`].
    pub fn with_body(mut self, payload: Map<String, Value>) -> Self {
        self.body = Some(clean_payload(payload));
        self
    }

    /// Display form, e.g. `/team/9012/space`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Authenticated client for the remote task service. Cheap to clone.
#[derive(Clone, Debug)]
pub struct RemoteClient {
    http: reqwest::Client,
    config: Arc<RemoteConfig>,
}

impl RemoteClient {
    pub fn new(config: Arc<RemoteConfig>) -> Self {
        Self {
            http: client(),
            config,
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Issue exactly one request. Non-2xx responses fail with
    /// [`GatewayError::Upstream`]; a 2xx body that is not JSON is returned
    /// as `{ "raw": text }`.
    pub async fn call(&self, request: RemoteRequest) -> Result<Value, GatewayError> {
        let token = self
            .config
            .token
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;
        let url = self.build_url(&request)?;
        let path = request.path();
        tracing::debug!(method = %request.method, path = %path, "remote call");

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(AUTHORIZATION, token);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("{} {path}: {e}", request.method)))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            GatewayError::Transport(format!("failed to read response body for {path}: {e}"))
        })?;
        let body = parse_response_body(&bytes);

        if !status.is_success() {
            tracing::warn!(
                method = %request.method,
                path = %path,
                status = status.as_u16(),
                "remote call failed"
            );
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                details: body,
            });
        }
        Ok(body)
    }

    fn build_url(&self, request: &RemoteRequest) -> Result<reqwest::Url, GatewayError> {
        let mut url = reqwest::Url::parse(&self.config.api_base).map_err(|e| {
            GatewayError::Transport(format!(
                "invalid remote base URL '{}': {e}",
                self.config.api_base
            ))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::Transport(format!(
                    "remote base URL '{}' cannot carry a path",
                    self.config.api_base
                ))
            })?
            .pop_if_empty()
            .extend(&request.segments);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

/// Empty bodies read as `{}`; anything that is not JSON is wrapped as `{ "raw": text }`.
pub(crate) fn parse_response_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return json!({});
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(bytes) }))
}
