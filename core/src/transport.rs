//! Async facade over a pluggable transport.
//!
//! # Design
//! `Transport` is the host side of the host-does-IO split: it turns an
//! `HttpRequest` into an `HttpResponse` and nothing else. Non-2xx statuses
//! come back as data so `ApiClient` alone decides what counts as an error.
//! `Api` pairs the two and exposes one async method per endpoint; each call
//! issues exactly one `send`, with no retries, caching or de-duplication.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::types::Skill;

/// Executes a single HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by a blocking `ureq` agent run on tokio's blocking pool.
///
/// Origin-relative URLs (the `/api` default) are resolved against `origin`
/// the way a browser resolves them against the page.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    origin: Option<String>,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, origin: None }
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.trim_end_matches('/').to_string());
        self
    }

    fn resolve(&self, url: &str) -> Result<String, ApiError> {
        if !url.starts_with('/') {
            return Ok(url.to_string());
        }
        match &self.origin {
            Some(origin) => Ok(format!("{origin}{url}")),
            None => Err(ApiError::Transport(format!(
                "cannot resolve relative URL {url} without an origin"
            ))),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.resolve(&request.url)?;
        tracing::debug!(method = request.method.as_str(), %url, "sending request");

        let agent = self.agent.clone();
        let response = tokio::task::spawn_blocking(move || execute(&agent, &url, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))??;

        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn execute(agent: &ureq::Agent, url: &str, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let result = match (request.method, request.body) {
        (HttpMethod::Get | HttpMethod::Delete, Some(_)) => {
            return Err(ApiError::Transport(format!(
                "{} request cannot have a body",
                request.method.as_str()
            )));
        }
        (HttpMethod::Get, None) => {
            let mut builder = agent.get(url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            builder.call()
        }
        (HttpMethod::Delete, None) => {
            let mut builder = agent.delete(url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            builder.call()
        }
        (HttpMethod::Post, body) => {
            let mut builder = agent.post(url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            builder.send(body.unwrap_or_default().as_bytes())
        }
        (HttpMethod::Put, body) => {
            let mut builder = agent.put(url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            builder.send(body.unwrap_or_default().as_bytes())
        }
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        headers,
        body,
    })
}

/// Async client for the RAG HH API.
#[derive(Debug, Clone)]
pub struct Api<T> {
    client: ApiClient,
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Issue one request and return its JSON body.
    pub async fn request(&self, path: &str, options: &RequestOptions) -> Result<Value, ApiError> {
        let request = self.client.build_request(path, options);
        self.client.parse_json(self.transport.send(request).await?)
    }

    pub async fn get_stats(&self) -> Result<Value, ApiError> {
        let response = self.transport.send(self.client.build_stats()).await?;
        self.client.parse_json(response)
    }

    pub async fn search(&self, query: &str, limit: u32) -> Result<Value, ApiError> {
        let response = self.transport.send(self.client.build_search(query, limit)).await?;
        self.client.parse_json(response)
    }

    pub async fn rag(&self, query: &str, limit: u32) -> Result<Value, ApiError> {
        let response = self.transport.send(self.client.build_rag(query, limit)).await?;
        self.client.parse_json(response)
    }

    pub async fn health(&self) -> Result<Value, ApiError> {
        let response = self.transport.send(self.client.build_health()).await?;
        self.client.parse_json(response)
    }

    pub async fn get_skills(&self, limit: u32) -> Result<Vec<Skill>, ApiError> {
        let response = self.transport.send(self.client.build_skills(limit)).await?;
        self.client.parse_skills(response)
    }
}
