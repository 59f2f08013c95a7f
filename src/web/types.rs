// src/web/types.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::core::{ConceptInsightsClient, ServiceError};
use crate::linkedin::{LinkedInClient, ProfileScraper};
use crate::profile::Normalizer;

/// Shared, read-only state managed by Rocket.
pub struct AppState {
    pub normalizer: Normalizer,
    pub concept_insights: ConceptInsightsClient,
    pub linkedin: LinkedInClient,
    pub scraper: ProfileScraper,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct LinkedInImportRequest {
    pub access_token: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

pub type ApiError = (Status, Json<StandardErrorResponse>);
pub type ApiResult<T> = Result<Json<DataResponse<T>>, ApiError>;

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

pub fn bad_request(error: &str, suggestion: &str) -> ApiError {
    (
        Status::BadRequest,
        Json(StandardErrorResponse::new(
            error.to_string(),
            "BAD_REQUEST".to_string(),
            vec![suggestion.to_string()],
        )),
    )
}

/// Map a failed service call to a response, relaying the upstream status
/// when the service replied and 500 otherwise.
pub fn service_failure(err: &anyhow::Error) -> ApiError {
    match ServiceError::find(err) {
        Some(service_error) => {
            let status =
                Status::from_code(service_error.status).unwrap_or(Status::InternalServerError);
            let error_code = match status.code {
                404 => "NOT_FOUND",
                401 | 403 => "SERVICE_AUTH_ERROR",
                400..=499 => "SERVICE_REJECTED",
                _ => "SERVICE_ERROR",
            };
            (
                status,
                Json(StandardErrorResponse::new(
                    format!("{:#}", err),
                    error_code.to_string(),
                    vec!["Check the document id and request body".to_string()],
                )),
            )
        }
        None => (
            Status::InternalServerError,
            Json(StandardErrorResponse::new(
                format!("{:#}", err),
                "SERVICE_UNAVAILABLE".to_string(),
                vec![
                    "Try again in a few moments".to_string(),
                    "Contact support if the problem persists".to_string(),
                ],
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_failure_relays_status() {
        let err = anyhow::Error::from(ServiceError {
            status: 404,
            body: "no such document".to_string(),
        })
        .context("Failed to fetch document 7 from jobs");

        let (status, body) = service_failure(&err);
        assert_eq!(status, Status::NotFound);
        assert_eq!(body.error_code, "NOT_FOUND");
        assert!(body.error.contains("no such document"));
    }

    #[test]
    fn test_transport_failure_is_internal_error() {
        let err = anyhow::anyhow!("connection refused");
        let (status, body) = service_failure(&err);
        assert_eq!(status, Status::InternalServerError);
        assert_eq!(body.error_code, "SERVICE_UNAVAILABLE");
    }
}
