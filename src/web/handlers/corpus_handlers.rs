// src/web/handlers/corpus_handlers.rs
//! Document CRUD over the jobs and candidates corpora

use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;
use tracing::{error, info};

use crate::types::{CanonicalProfile, Corpus, CorpusDocument, JobPosting};
use crate::web::types::{
    bad_request, service_failure, ApiError, ApiResult, AppState, DataResponse,
};

#[derive(Debug, Clone, Copy)]
pub enum WriteMode {
    Create,
    Update,
}

fn job_document(job: &JobPosting) -> Result<CorpusDocument, ApiError> {
    let id = job.document_id().ok_or_else(|| {
        bad_request(
            "Job posting needs an id or code",
            "Set `id` when creating or `code` when updating",
        )
    })?;
    Ok(CorpusDocument::from_job(job, id))
}

fn candidate_document(profile: &CanonicalProfile) -> Result<CorpusDocument, ApiError> {
    if profile.id.trim().is_empty() {
        return Err(bad_request(
            "Candidate needs an id",
            "Import the profile first or set `id`",
        ));
    }
    Ok(CorpusDocument::from_candidate(profile))
}

async fn write_document(
    state: &AppState,
    corpus: Corpus,
    document: CorpusDocument,
    mode: WriteMode,
) -> ApiResult<Value> {
    let result = match mode {
        WriteMode::Create => state.concept_insights.create_document(corpus, &document).await,
        WriteMode::Update => state.concept_insights.update_document(corpus, &document).await,
    };

    match result {
        Ok(value) => {
            info!("{:?} document {} in {}", mode, document.id, corpus);
            Ok(Json(DataResponse::success(
                format!("Document '{}' saved", document.id),
                value,
            )))
        }
        Err(e) => {
            error!("Failed to write document {} in {}: {:#}", document.id, corpus, e);
            Err(service_failure(&e))
        }
    }
}

pub async fn write_job_handler(
    job: Json<JobPosting>,
    mode: WriteMode,
    state: &State<AppState>,
) -> ApiResult<Value> {
    let document = job_document(&job)?;
    write_document(state, Corpus::Jobs, document, mode).await
}

pub async fn write_candidate_handler(
    profile: Json<CanonicalProfile>,
    mode: WriteMode,
    state: &State<AppState>,
) -> ApiResult<Value> {
    let document = candidate_document(&profile)?;
    write_document(state, Corpus::Candidates, document, mode).await
}

pub async fn list_documents_handler(corpus: Corpus, state: &State<AppState>) -> ApiResult<Value> {
    match state.concept_insights.list_document_ids(corpus).await {
        Ok(ids) => Ok(Json(DataResponse::success(
            format!("Documents in {}", corpus),
            ids,
        ))),
        Err(e) => {
            error!("Failed to list {}: {:#}", corpus, e);
            Err(service_failure(&e))
        }
    }
}

pub async fn get_document_handler(
    corpus: Corpus,
    id: &str,
    state: &State<AppState>,
) -> ApiResult<Value> {
    match state.concept_insights.get_document(corpus, id).await {
        Ok(document) => Ok(Json(DataResponse::success(
            format!("Document '{}' loaded", id),
            document,
        ))),
        Err(e) => {
            error!("Failed to load {} from {}: {:#}", id, corpus, e);
            Err(service_failure(&e))
        }
    }
}

pub async fn delete_document_handler(
    corpus: Corpus,
    id: &str,
    state: &State<AppState>,
) -> ApiResult<Value> {
    match state.concept_insights.delete_document(corpus, id).await {
        Ok(result) => {
            info!("Deleted {} from {}", id, corpus);
            Ok(Json(DataResponse::success(
                format!("Document '{}' deleted", id),
                result,
            )))
        }
        Err(e) => {
            error!("Failed to delete {} from {}: {:#}", id, corpus, e);
            Err(service_failure(&e))
        }
    }
}
