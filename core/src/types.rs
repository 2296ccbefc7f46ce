//! Response DTOs for the RAG HH API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! the integration test catches drift between the two crates. Optional
//! fields are the ones the backend reports as nullable.

use serde::{Deserialize, Serialize};

/// A skill with the number of vacancies mentioning it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub vacancy_count: i64,
}

/// Body of `GET /skills`. A missing `skills` field is not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillsResponse<T = Skill> {
    pub skills: Option<Vec<T>>,
}

/// One vacancy returned by `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub hh_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub employer_name: Option<String>,
    pub area_name: Option<String>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub url: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// A vacancy cited in a RAG context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagSource {
    pub name: String,
    pub url: String,
    pub similarity: f64,
}

/// Body of `GET /rag`: a prompt-ready context plus the vacancies it was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagResponse {
    pub query: String,
    pub context: String,
    pub sources: Vec<RagSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}
