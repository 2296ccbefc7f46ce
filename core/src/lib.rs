//! API client core for the RAG HH service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `Api` wraps the same client
//! around an async `Transport` for callers that just want JSON back.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only the base URL, resolved once at
//!   startup through `ApiConfig`.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Every failure reaches the caller as an `ApiError`; nothing is retried,
//!   logged or swallowed by the client.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{ApiClient, DEFAULT_RAG_LIMIT, DEFAULT_SEARCH_LIMIT, DEFAULT_SKILLS_LIMIT};
pub use config::{ApiConfig, API_URL_VAR, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use transport::{Api, Transport, UreqTransport};
pub use types::{HealthStatus, RagResponse, RagSource, SearchHit, SearchResponse, Skill, SkillsResponse};
