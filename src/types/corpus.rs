// src/types/corpus.rs
//! Document envelope exchanged with the concept-insights corpora

use serde::{Deserialize, Serialize};
use std::fmt;

use super::profile::CanonicalProfile;

pub const JOB_PART_NAME: &str = "Job description";
pub const CANDIDATE_PART_NAME: &str = "Candidate";
const TEXT_PART_TYPE: &str = "text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corpus {
    Jobs,
    Candidates,
}

impl Corpus {
    pub const ALL: [Corpus; 2] = [Corpus::Jobs, Corpus::Candidates];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corpus::Jobs => "jobs",
            Corpus::Candidates => "candidates",
        }
    }

    /// Fully-qualified document id as the search API expects it.
    pub fn document_path(&self, account: &str, document_id: &str) -> String {
        format!("/corpus/{}/{}/{}", account, self.as_str(), document_id)
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPart {
    pub data: String,
    pub name: String,
    #[serde(rename = "type")]
    pub part_type: String,
}

impl DocumentPart {
    pub fn text(name: &str, data: String) -> Self {
        Self {
            data,
            name: name.to_string(),
            part_type: TEXT_PART_TYPE.to_string(),
        }
    }
}

/// Extra fields stored alongside candidate documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_public_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_headline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub parts: Vec<DocumentPart>,
    #[serde(flatten)]
    pub candidate: CandidateFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmodified: Option<String>,
}

/// Job posting as submitted for indexing. Creation sends `id`, updates send `code`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl JobPosting {
    /// Identifier to store the posting under, preferring `id` over `code`.
    pub fn document_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.code.as_deref())
            .filter(|id| !id.trim().is_empty())
    }
}

impl CorpusDocument {
    pub fn from_job(job: &JobPosting, document_id: &str) -> Self {
        Self {
            id: document_id.to_string(),
            label: job.title.clone(),
            parts: vec![DocumentPart::text(JOB_PART_NAME, job.description.clone())],
            candidate: CandidateFields::default(),
            lastmodified: None,
        }
    }

    pub fn from_candidate(profile: &CanonicalProfile) -> Self {
        Self {
            id: profile.id.clone(),
            label: profile.full_name.clone(),
            parts: vec![DocumentPart::text(CANDIDATE_PART_NAME, profile.data.clone())],
            candidate: CandidateFields {
                candidate_picture_url: Some(profile.picture_url.clone()),
                candidate_public_profile_url: Some(profile.public_profile_url.clone()),
                candidate_email_address: Some(profile.email_address.clone()),
                candidate_headline: Some(profile.headline.clone()),
            },
            lastmodified: None,
        }
    }

    /// First part's text, or empty when the document has no parts.
    pub fn primary_text(&self) -> &str {
        self.parts.first().map(|part| part.data.as_str()).unwrap_or("")
    }
}

impl From<&CorpusDocument> for CanonicalProfile {
    fn from(document: &CorpusDocument) -> Self {
        let fields = &document.candidate;
        Self {
            id: document.id.clone(),
            full_name: document.label.clone(),
            headline: fields.candidate_headline.clone().unwrap_or_default(),
            picture_url: fields.candidate_picture_url.clone().unwrap_or_default(),
            public_profile_url: fields
                .candidate_public_profile_url
                .clone()
                .unwrap_or_default(),
            email_address: fields.candidate_email_address.clone().unwrap_or_default(),
            data: document.primary_text().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_profile() -> CanonicalProfile {
        CanonicalProfile {
            id: "cand-1".to_string(),
            full_name: "Jane Roe".to_string(),
            headline: "Data engineer".to_string(),
            picture_url: "/images/user.png".to_string(),
            public_profile_url: "https://example.com/in/jane".to_string(),
            email_address: "jane@example.com".to_string(),
            data: "Builds pipelines. ".to_string(),
        }
    }

    #[test]
    fn test_candidate_document_shape() {
        let document = CorpusDocument::from_candidate(&sample_profile());
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "cand-1",
                "label": "Jane Roe",
                "parts": [{ "data": "Builds pipelines. ", "name": "Candidate", "type": "text" }],
                "candidatePictureUrl": "/images/user.png",
                "candidatePublicProfileUrl": "https://example.com/in/jane",
                "candidateEmailAddress": "jane@example.com",
                "candidateHeadline": "Data engineer"
            })
        );
    }

    #[test]
    fn test_job_document_shape() {
        let job = JobPosting {
            id: None,
            code: Some("J-7".to_string()),
            title: "Rust developer".to_string(),
            description: "Write services".to_string(),
        };
        let document = CorpusDocument::from_job(&job, job.document_id().unwrap());
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "J-7",
                "label": "Rust developer",
                "parts": [{ "data": "Write services", "name": "Job description", "type": "text" }]
            })
        );
    }

    #[test]
    fn test_candidate_round_trip_through_store() {
        let profile = sample_profile();
        let document = CorpusDocument::from_candidate(&profile);
        assert_eq!(CanonicalProfile::from(&document), profile);
    }

    #[test]
    fn test_stored_document_without_extras() {
        let document: CorpusDocument = serde_json::from_value(json!({
            "id": "x",
            "label": "Someone",
            "parts": [],
            "lastmodified": "2015-06-01T10:00:00Z"
        }))
        .unwrap();

        let profile = CanonicalProfile::from(&document);
        assert_eq!(profile.full_name, "Someone");
        assert_eq!(profile.headline, "");
        assert_eq!(profile.data, "");
    }

    #[test]
    fn test_document_path() {
        assert_eq!(
            Corpus::Candidates.document_path("acct", "42"),
            "/corpus/acct/candidates/42"
        );
    }

    #[test]
    fn test_job_document_id_ignores_blank() {
        let job = JobPosting {
            id: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(job.document_id().is_none());
    }
}
