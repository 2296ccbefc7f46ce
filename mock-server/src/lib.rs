use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A vacancy as the backend indexes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vacancy {
    pub hh_id: String,
    pub name: String,
    pub description: String,
    pub employer_name: Option<String>,
    pub area_name: Option<String>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub url: String,
    pub key_skills: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchHit {
    pub hh_id: String,
    pub name: String,
    pub description: String,
    pub employer_name: Option<String>,
    pub area_name: Option<String>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub url: String,
    pub similarity: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub vacancy_count: i64,
}

#[derive(Deserialize)]
pub struct QueryParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// Error body in the backend's `{"detail": ...}` shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, detail = %self.detail, "request rejected");
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub type Db = Arc<Vec<Vacancy>>;

const DESCRIPTION_PREVIEW: usize = 500;

pub fn app() -> Router {
    app_with(fixtures())
}

pub fn app_with(vacancies: Vec<Vacancy>) -> Router {
    let db: Db = Arc::new(vacancies);
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/search", get(search))
        .route("/rag", get(rag))
        .route("/skills", get(skills))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn stats(State(db): State<Db>) -> Json<Value> {
    let companies: BTreeSet<&str> = db.iter().filter_map(|v| v.employer_name.as_deref()).collect();
    let regions: BTreeSet<&str> = db.iter().filter_map(|v| v.area_name.as_deref()).collect();
    let salaries: Vec<i64> = db
        .iter()
        .flat_map(|v| [v.salary_from, v.salary_to])
        .flatten()
        .collect();
    let salary = if salaries.is_empty() {
        json!({ "min": null, "max": null, "avg": null })
    } else {
        let sum: i64 = salaries.iter().sum();
        json!({
            "min": salaries.iter().min(),
            "max": salaries.iter().max(),
            "avg": sum / salaries.len() as i64,
        })
    };
    Json(json!({
        "total_vacancies": db.len(),
        "companies": companies.len(),
        "regions": regions.len(),
        "salary": salary,
    }))
}

async fn search(
    State(db): State<Db>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Value>, ApiError> {
    let (query, limit) = validate(params, 10, 50)?;
    let results = search_similar(&db, &query, limit);
    Ok(Json(json!({ "query": query, "results": results })))
}

async fn rag(
    State(db): State<Db>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Value>, ApiError> {
    let (query, limit) = validate(params, 5, 20)?;
    let results = search_similar(&db, &query, limit);
    let context = results
        .iter()
        .enumerate()
        .map(|(i, r)| context_block(i + 1, r))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");
    let sources: Vec<Value> = results
        .iter()
        .map(|r| json!({ "name": r.name, "url": r.url, "similarity": r.similarity }))
        .collect();
    Ok(Json(json!({ "query": query, "context": context, "sources": sources })))
}

async fn skills(
    State(db): State<Db>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Value>, ApiError> {
    let limit = params.limit.unwrap_or(200);
    if limit < 1 {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "limit must be at least 1",
        ));
    }
    let mut skills = count_skills(&db);
    skills.truncate(limit as usize);
    Ok(Json(json!({ "skills": skills })))
}

fn validate(params: QueryParams, default_limit: i64, max_limit: i64) -> Result<(String, usize), ApiError> {
    let Some(query) = params.q else {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "query parameter q is required",
        ));
    };
    let limit = params.limit.unwrap_or(default_limit);
    if !(1..=max_limit).contains(&limit) {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("limit must be between 1 and {max_limit}"),
        ));
    }
    if query.trim().is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Query is empty"));
    }
    Ok((query, limit as usize))
}

/// Rank vacancies by the share of query terms they mention.
pub fn search_similar(db: &[Vacancy], query: &str, limit: usize) -> Vec<SearchHit> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    let mut hits: Vec<SearchHit> = db
        .iter()
        .map(|v| {
            let text = format!("{} {} {}", v.name, v.description, v.key_skills.join(" ")).to_lowercase();
            let matched = terms.iter().filter(|t| text.contains(t.as_str())).count();
            let similarity = if terms.is_empty() {
                0.0
            } else {
                (matched as f64 / terms.len() as f64 * 10_000.0).round() / 10_000.0
            };
            SearchHit {
                hh_id: v.hh_id.clone(),
                name: v.name.clone(),
                description: v.description.chars().take(DESCRIPTION_PREVIEW).collect(),
                employer_name: v.employer_name.clone(),
                area_name: v.area_name.clone(),
                salary_from: v.salary_from,
                salary_to: v.salary_to,
                url: v.url.clone(),
                similarity,
            }
        })
        .collect();
    hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity).then_with(|| a.hh_id.cmp(&b.hh_id)));
    hits.truncate(limit);
    tracing::debug!(query, hits = hits.len(), "search");
    hits
}

/// `[Вакансия i] name — employer (area)` followed by the description.
fn context_block(index: usize, hit: &SearchHit) -> String {
    let mut ctx = format!("[Вакансия {index}] {}", hit.name);
    if let Some(employer) = &hit.employer_name {
        ctx.push_str(&format!(" — {employer}"));
    }
    if let Some(area) = &hit.area_name {
        ctx.push_str(&format!(" ({area})"));
    }
    if !hit.description.is_empty() {
        ctx.push('\n');
        ctx.push_str(&hit.description);
    }
    ctx
}

/// Normalized skill names with vacancy counts, most frequent first.
pub fn count_skills(db: &[Vacancy]) -> Vec<Skill> {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for vacancy in db {
        let names: BTreeSet<String> = vacancy
            .key_skills
            .iter()
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        for name in names {
            *counts.entry(name).or_default() += 1;
        }
    }
    let mut skills: Vec<Skill> = counts
        .into_iter()
        .enumerate()
        .map(|(i, (name, vacancy_count))| Skill {
            id: i as i64 + 1,
            name,
            vacancy_count,
        })
        .collect();
    skills.sort_by(|a, b| b.vacancy_count.cmp(&a.vacancy_count).then_with(|| a.name.cmp(&b.name)));
    skills
}

fn vacancy(
    hh_id: &str,
    name: &str,
    description: &str,
    employer: &str,
    area: &str,
    salary: (Option<i64>, Option<i64>),
    key_skills: &[&str],
) -> Vacancy {
    Vacancy {
        hh_id: hh_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        employer_name: Some(employer.to_string()),
        area_name: Some(area.to_string()),
        salary_from: salary.0,
        salary_to: salary.1,
        url: format!("https://hh.ru/vacancy/{hh_id}"),
        key_skills: key_skills.iter().map(|s| s.to_string()).collect(),
    }
}

/// The vacancies served by `app()`.
pub fn fixtures() -> Vec<Vacancy> {
    vec![
        vacancy(
            "100001",
            "Data Engineer",
            "Build batch pipelines with Airflow and Spark, model the DWH in ClickHouse.",
            "Yandex",
            "Москва",
            (Some(250_000), Some(350_000)),
            &["Python", "SQL", "Airflow", "Spark"],
        ),
        vacancy(
            "100002",
            "Senior Python Developer",
            "Backend services on FastAPI and PostgreSQL, async Python, Docker.",
            "Ozon",
            "Санкт-Петербург",
            (Some(300_000), None),
            &["Python", "PostgreSQL", "Docker"],
        ),
        vacancy(
            "100003",
            "ML Engineer",
            "Train and serve ranking models, PyTorch, feature stores, Kafka streams.",
            "Avito",
            "Москва",
            (None, Some(400_000)),
            &["Python", "PyTorch", "Kafka"],
        ),
        vacancy(
            "100004",
            "Analytics Engineer",
            "dbt models on top of Greenplum, SQL reviews, data quality checks.",
            "Tinkoff",
            "Екатеринбург",
            (Some(200_000), Some(260_000)),
            &["SQL", "dbt", "Greenplum"],
        ),
    ]
}
