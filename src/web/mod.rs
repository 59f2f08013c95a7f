// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, put, routes, Build, Request, Response, Rocket, State};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::core::{ConceptInsightsClient, ConfigManager};
use crate::linkedin::{LinkedInClient, ProfileScraper};
use crate::profile::Normalizer;
use crate::types::{CanonicalProfile, Corpus, JobPosting, RawTextProfile, SourceProfile};
use handlers::WriteMode;

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

impl AppState {
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::new(config.normalizer),
            concept_insights: ConceptInsightsClient::new(&config.concept_insights)?,
            linkedin: LinkedInClient::new(&config.linkedin)?,
            scraper: ProfileScraper::new(config.linkedin.timeout_seconds)?,
        })
    }
}

// Profile import

#[post("/parse", data = "<request>")]
pub async fn parse_text_profile(
    request: Json<RawTextProfile>,
    state: &State<AppState>,
) -> ApiResult<CanonicalProfile> {
    handlers::parse_text_profile_handler(request, state).await
}

#[post("/profile/normalize", data = "<request>")]
pub async fn normalize_profile(
    request: Json<SourceProfile>,
    state: &State<AppState>,
) -> ApiResult<CanonicalProfile> {
    handlers::normalize_profile_handler(request, state).await
}

#[post("/profile/linkedin", data = "<request>")]
pub async fn import_linkedin_profile(
    request: Json<LinkedInImportRequest>,
    state: &State<AppState>,
) -> ApiResult<CanonicalProfile> {
    handlers::import_linkedin_profile_handler(request, state).await
}

#[get("/user/<id>")]
pub async fn get_user(id: &str, state: &State<AppState>) -> ApiResult<CanonicalProfile> {
    handlers::get_user_handler(id, state).await
}

// Jobs corpus

#[put("/ci/jobs", data = "<job>")]
pub async fn create_job(job: Json<JobPosting>, state: &State<AppState>) -> ApiResult<Value> {
    handlers::write_job_handler(job, WriteMode::Create, state).await
}

#[post("/ci/jobs", data = "<job>")]
pub async fn update_job(job: Json<JobPosting>, state: &State<AppState>) -> ApiResult<Value> {
    handlers::write_job_handler(job, WriteMode::Update, state).await
}

#[get("/ci/jobs")]
pub async fn list_jobs(state: &State<AppState>) -> ApiResult<Value> {
    handlers::list_documents_handler(Corpus::Jobs, state).await
}

#[get("/ci/jobs/<id>")]
pub async fn get_job(id: &str, state: &State<AppState>) -> ApiResult<Value> {
    handlers::get_document_handler(Corpus::Jobs, id, state).await
}

#[delete("/ci/jobs/<id>")]
pub async fn delete_job(id: &str, state: &State<AppState>) -> ApiResult<Value> {
    handlers::delete_document_handler(Corpus::Jobs, id, state).await
}

// Candidates corpus

#[put("/ci/candidates", data = "<profile>")]
pub async fn create_candidate(
    profile: Json<CanonicalProfile>,
    state: &State<AppState>,
) -> ApiResult<Value> {
    handlers::write_candidate_handler(profile, WriteMode::Create, state).await
}

#[post("/ci/candidates", data = "<profile>")]
pub async fn update_candidate(
    profile: Json<CanonicalProfile>,
    state: &State<AppState>,
) -> ApiResult<Value> {
    handlers::write_candidate_handler(profile, WriteMode::Update, state).await
}

#[get("/ci/candidates")]
pub async fn list_candidates(state: &State<AppState>) -> ApiResult<Value> {
    handlers::list_documents_handler(Corpus::Candidates, state).await
}

#[get("/ci/candidates/<id>")]
pub async fn get_candidate(id: &str, state: &State<AppState>) -> ApiResult<Value> {
    handlers::get_document_handler(Corpus::Candidates, id, state).await
}

#[delete("/ci/candidates/<id>")]
pub async fn delete_candidate(id: &str, state: &State<AppState>) -> ApiResult<Value> {
    handlers::delete_document_handler(Corpus::Candidates, id, state).await
}

// Search

#[get("/ci/semantic_search/candidate/<candidate>/<limit>?<params..>")]
pub async fn jobs_for_candidate(
    candidate: &str,
    limit: &str,
    params: HashMap<String, String>,
    state: &State<AppState>,
) -> ApiResult<Value> {
    handlers::semantic_search_handler(
        Corpus::Candidates,
        Corpus::Jobs,
        candidate,
        limit,
        params,
        state,
    )
    .await
}

#[get("/ci/semantic_search/job/<job>/<limit>?<params..>")]
pub async fn candidates_for_job(
    job: &str,
    limit: &str,
    params: HashMap<String, String>,
    state: &State<AppState>,
) -> ApiResult<Value> {
    handlers::semantic_search_handler(Corpus::Jobs, Corpus::Candidates, job, limit, params, state)
        .await
}

#[get("/ci/graph_search?<ids>&<params..>")]
pub async fn graph_search(
    ids: Option<String>,
    params: HashMap<String, String>,
    state: &State<AppState>,
) -> ApiResult<Value> {
    handlers::graph_search_handler(ids, params, state).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request_catcher() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found_catcher() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Route not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path and method".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_catcher() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected shape".to_string(),
        "INVALID_BODY".to_string(),
        vec!["Verify field names and types".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error_catcher() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the Rocket instance without launching it.
pub fn build_rocket(state: AppState, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment().merge(("port", port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![
                bad_request_catcher,
                not_found_catcher,
                unprocessable_catcher,
                internal_error_catcher
            ],
        )
        .mount(
            "/api",
            routes![
                parse_text_profile,
                normalize_profile,
                import_linkedin_profile,
                get_user,
                create_job,
                update_job,
                list_jobs,
                get_job,
                delete_job,
                create_candidate,
                update_candidate,
                list_candidates,
                get_candidate,
                delete_candidate,
                jobs_for_candidate,
                candidates_for_job,
                graph_search,
                health,
                options,
            ],
        )
}

/// Create both corpora; an existing corpus is reported by the service and ignored.
pub async fn ensure_corpora(client: &ConceptInsightsClient) {
    for corpus in Corpus::ALL {
        match client.create_corpus(corpus).await {
            Ok(_) => info!("Corpus {} created", corpus),
            Err(e) => warn!("Corpus {} not created: {:#}", corpus, e),
        }
    }
}

pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    config.ensure_service_credentials()?;

    let state = AppState::from_config(&config)?;
    ensure_corpora(&state.concept_insights).await;

    info!("Starting talent-match API server on port {}", config.port);
    info!("Concept insights: {}", config.concept_insights.url);

    let _rocket = build_rocket(state, config.port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
