//! Stateless HTTP request builder and response parser for the RAG HH API.
//!
//! # Design
//! `ApiClient` holds only the resolved base URL and carries no mutable state
//! between calls. Every endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`; the caller executes the round-trip in between.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{merge_headers, HttpRequest, HttpResponse, RequestOptions};
use crate::types::Skill;

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_RAG_LIMIT: u32 = 5;
pub const DEFAULT_SKILLS_LIMIT: u32 = 50;

/// Synchronous, stateless client for the RAG HH API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for `path`.
    ///
    /// Absolute `http://`/`https://` URLs pass through untouched; anything
    /// else is appended to the base URL.
    pub fn build_request(&self, path: &str, options: &RequestOptions) -> HttpRequest {
        let url = if is_absolute(path) {
            path.to_string()
        } else {
            format!("{}{path}", self.base_url)
        };
        HttpRequest {
            method: options.method,
            url,
            headers: merge_headers(&options.headers),
            body: options.body.clone(),
        }
    }

    pub fn build_stats(&self) -> HttpRequest {
        self.build_request("/stats", &RequestOptions::default())
    }

    pub fn build_search(&self, query: &str, limit: u32) -> HttpRequest {
        self.build_request(&format!("/search?{}", query_params(query, limit)), &RequestOptions::default())
    }

    pub fn build_rag(&self, query: &str, limit: u32) -> HttpRequest {
        self.build_request(&format!("/rag?{}", query_params(query, limit)), &RequestOptions::default())
    }

    pub fn build_health(&self) -> HttpRequest {
        self.build_request("/health", &RequestOptions::default())
    }

    pub fn build_skills(&self, limit: u32) -> HttpRequest {
        self.build_request(&format!("/skills?limit={limit}"), &RequestOptions::default())
    }

    /// Return the JSON body of a successful response unchanged.
    pub fn parse_json(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Decode the body of a successful response into `T`.
    pub fn parse_as<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Unwrap the `skills` array; a body without one yields an empty list.
    pub fn parse_skills(&self, response: HttpResponse) -> Result<Vec<Skill>, ApiError> {
        self.parse_skills_as(response)
    }

    /// `parse_skills` with a caller-chosen element type.
    ///
    /// Only an object's `skills` field counts; any other body, or a falsy
    /// field, yields an empty list.
    pub fn parse_skills_as<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Vec<T>, ApiError> {
        let body = self.parse_json(response)?;
        match body.get("skills") {
            Some(skills) if !is_falsy(skills) => Ok(Vec::<T>::deserialize(skills)?),
            _ => Ok(Vec::new()),
        }
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// `q` (trimmed) and `limit`, form-urlencoded in that order.
fn query_params(query: &str, limit: u32) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query.trim())
        .append_pair("limit", &limit.to_string())
        .finish()
}

/// Turn a non-2xx response into `ApiError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        message: error_message(response),
    })
}

/// The server's `detail`, or the status text when there is none to use.
///
/// `detail` is read only from a JSON object body.
fn error_message(response: &HttpResponse) -> String {
    let body = serde_json::from_str::<Value>(&response.body).unwrap_or(Value::Null);
    match body.as_object().and_then(|o| o.get("detail")) {
        Some(detail) if is_falsy(detail) => response.status_text.clone(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => response.status_text.clone(),
    }
}

/// `null`, `false`, `0` and `""`.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
