// src/web/handlers/search_handlers.rs
//! Matching across corpora and concept lookups

use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{error, info};

use crate::core::concept_insights::{parse_ids, DEFAULT_SEARCH_LIMIT};
use crate::types::Corpus;
use crate::web::types::{bad_request, service_failure, ApiResult, AppState, DataResponse};

/// Positive limit from the path, or the default.
pub fn parse_limit(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(limit) if limit > 0 => limit,
        _ => DEFAULT_SEARCH_LIMIT,
    }
}

/// Query parameters forwarded verbatim, in a stable order.
pub fn forwarded_params(params: HashMap<String, String>, skip: &[&str]) -> Vec<(String, String)> {
    let mut forwarded: Vec<(String, String)> = params
        .into_iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .collect();
    forwarded.sort();
    forwarded
}

/// Search `target` for documents related to `source_id`, which lives in `source`.
pub async fn semantic_search_handler(
    source: Corpus,
    target: Corpus,
    source_id: &str,
    limit: &str,
    params: HashMap<String, String>,
    state: &State<AppState>,
) -> ApiResult<Value> {
    let client = &state.concept_insights;
    let ids = vec![source.document_path(client.account(), source_id)];
    let limit = parse_limit(limit);
    let extra = forwarded_params(params, &["func", "user", "corpus"]);

    info!(
        "Searching {} for matches of {} {} (limit {})",
        target, source, source_id, limit
    );

    match client.semantic_search(target, &ids, limit, &extra).await {
        Ok(result) => Ok(Json(DataResponse::success(
            format!("Matches in {}", target),
            result,
        ))),
        Err(e) => {
            error!("Semantic search failed: {:#}", e);
            Err(service_failure(&e))
        }
    }
}

pub async fn graph_search_handler(
    ids: Option<String>,
    params: HashMap<String, String>,
    state: &State<AppState>,
) -> ApiResult<Value> {
    let ids = ids.map(|raw| parse_ids(&raw)).unwrap_or_default();
    if ids.is_empty() {
        return Err(bad_request(
            "No concept ids given",
            "Pass `ids` as a JSON array or comma-separated list",
        ));
    }

    let extra = forwarded_params(params, &["ids", "user"]);
    info!("Fetching metadata for {} concepts", ids.len());

    match state.concept_insights.concepts_metadata(&ids, &extra).await {
        Ok(concepts) => Ok(Json(DataResponse::success(
            format!("{} concepts", ids.len()),
            concepts,
        ))),
        Err(e) => {
            error!("Concept metadata lookup failed: {:#}", e);
            Err(service_failure(&e))
        }
    }
}
