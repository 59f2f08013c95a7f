// src/web/handlers/profile_handlers.rs
//! Profile import: pasted text, provider profiles and stored candidates

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

use crate::types::{CanonicalProfile, RawTextProfile, SourceProfile};
use crate::web::types::{
    bad_request, service_failure, ApiResult, AppState, DataResponse, LinkedInImportRequest,
    StandardErrorResponse,
};

pub async fn parse_text_profile_handler(
    request: Json<RawTextProfile>,
    state: &State<AppState>,
) -> ApiResult<CanonicalProfile> {
    if request.name.trim().is_empty() {
        return Err(bad_request(
            "Profile name cannot be empty",
            "Provide the candidate's name",
        ));
    }

    let profile = state.normalizer.normalize_raw_text(&request);
    info!(
        "Parsed text profile for {} ({} chars)",
        profile.full_name,
        profile.data.len()
    );

    Ok(Json(DataResponse::success(
        "Profile parsed".to_string(),
        profile,
    )))
}

pub async fn normalize_profile_handler(
    request: Json<SourceProfile>,
    state: &State<AppState>,
) -> ApiResult<CanonicalProfile> {
    let profile = state.normalizer.normalize_structured(&request);
    info!("Normalized structured profile {}", profile.id);

    Ok(Json(DataResponse::success(
        "Profile normalized".to_string(),
        profile,
    )))
}

pub async fn import_linkedin_profile_handler(
    request: Json<LinkedInImportRequest>,
    state: &State<AppState>,
) -> ApiResult<CanonicalProfile> {
    if request.access_token.trim().is_empty() {
        return Err(bad_request(
            "Access token cannot be empty",
            "Complete the LinkedIn authorization first",
        ));
    }

    let source = match state.linkedin.fetch_profile(&request.access_token).await {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to fetch LinkedIn profile: {:#}", e);
            return Err((
                Status::BadGateway,
                Json(StandardErrorResponse::new(
                    format!("{:#}", e),
                    "LINKEDIN_ERROR".to_string(),
                    vec![
                        "The access token may have expired".to_string(),
                        "Authorize the application again".to_string(),
                    ],
                )),
            ));
        }
    };

    let mut profile = state.normalizer.normalize_structured(&source);

    // The public page usually carries more text than the API fields.
    if !profile.public_profile_url.is_empty() {
        match state
            .scraper
            .fetch_profile_text(&profile.public_profile_url)
            .await
        {
            Ok(Some(text)) => profile.data = state.normalizer.clean(&text),
            Ok(None) => {}
            Err(e) => warn!(
                "Keeping API profile text, scraping {} failed: {:#}",
                profile.public_profile_url, e
            ),
        }
    }

    info!("Imported LinkedIn profile for {}", profile.full_name);
    Ok(Json(DataResponse::success(
        "Profile imported".to_string(),
        profile,
    )))
}

pub async fn get_user_handler(id: &str, state: &State<AppState>) -> ApiResult<CanonicalProfile> {
    let document = state
        .concept_insights
        .get_candidate(id)
        .await
        .map_err(|e| {
            error!("Failed to load candidate {}: {:#}", id, e);
            service_failure(&e)
        })?;

    let profile = CanonicalProfile::from(&document);
    info!(
        "Loaded candidate {} (last modified: {})",
        profile.id,
        document.lastmodified.as_deref().unwrap_or("unknown")
    );

    Ok(Json(DataResponse::success(
        "Candidate loaded".to_string(),
        profile,
    )))
}
