// src/core/concept_insights.rs
//! HTTP client for the concept-insights corpora and concept graph

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, Url};
use serde_json::{json, Value};
use std::fmt;
use tracing::{error, info, trace};

use super::config_manager::ConceptInsightsConfig;
use crate::types::{Corpus, CorpusDocument};

pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Non-success reply from the service. Handlers relay `status` to their caller.
#[derive(Debug, Clone)]
pub struct ServiceError {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "concept insights returned {}: {}", self.status, self.body)
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Find a `ServiceError` anywhere in an error's context chain.
    pub fn find(err: &anyhow::Error) -> Option<&ServiceError> {
        err.chain().find_map(|cause| cause.downcast_ref::<ServiceError>())
    }
}

pub struct ConceptInsightsClient {
    client: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
    account: String,
}

impl ConceptInsightsClient {
    pub fn new(config: &ConceptInsightsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.url)
            .with_context(|| format!("Invalid concept insights url: {}", config.url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Concept insights url cannot be a base: {}", config.url);
        }

        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
            account: config.account.clone(),
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Base url with `segments` appended. Each segment is percent-encoded, so
    /// `/`, `?` and `#` inside a segment never change the path structure.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("Concept insights url cannot be a base"))?;
            path.pop_if_empty();
            for segment in segments {
                if matches!(segment, "" | "." | "..") {
                    anyhow::bail!("Invalid path segment: {:?}", segment);
                }
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn corpus_url(&self, corpus: Corpus) -> Result<Url> {
        self.endpoint(["corpora", self.account.as_str(), corpus.as_str()])
    }

    fn corpus_endpoint(&self, corpus: Corpus, tail: &str) -> Result<Url> {
        self.endpoint(["corpora", self.account.as_str(), corpus.as_str(), tail])
    }

    fn document_url(&self, corpus: Corpus, document_id: &str) -> Result<Url> {
        self.endpoint([
            "corpora",
            self.account.as_str(),
            corpus.as_str(),
            "documents",
            document_id,
        ])
        .with_context(|| format!("Invalid document id {:?}", document_id))
    }

    /// Concept ids are graph paths; each of their segments is encoded separately.
    fn concept_url(&self, concept_id: &str) -> Result<Url> {
        let path = concept_id.trim_start_matches('/');
        if path.is_empty() {
            anyhow::bail!("Empty concept id");
        }
        self.endpoint(path.split('/'))
            .with_context(|| format!("Invalid concept id {:?}", concept_id))
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        self.client
            .request(method, url.clone())
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Create a private corpus owned by the configured account.
    pub async fn create_corpus(&self, corpus: Corpus) -> Result<Value> {
        let body = json!({
            "access": "private",
            "users": [{ "uid": self.username, "permission": "ReadWriteAdmin" }]
        });
        let url = self.corpus_url(corpus)?;
        self.send(self.request(Method::PUT, &url).json(&body), &url)
            .await
            .with_context(|| format!("Failed to create corpus {}", corpus))
    }

    pub async fn create_document(&self, corpus: Corpus, document: &CorpusDocument) -> Result<Value> {
        let url = self.document_url(corpus, &document.id)?;
        self.send(self.request(Method::PUT, &url).json(document), &url)
            .await
            .with_context(|| format!("Failed to create document {} in {}", document.id, corpus))
    }

    pub async fn update_document(&self, corpus: Corpus, document: &CorpusDocument) -> Result<Value> {
        let url = self.document_url(corpus, &document.id)?;
        self.send(self.request(Method::POST, &url).json(document), &url)
            .await
            .with_context(|| format!("Failed to update document {} in {}", document.id, corpus))
    }

    pub async fn get_document(&self, corpus: Corpus, document_id: &str) -> Result<Value> {
        let url = self.document_url(corpus, document_id)?;
        self.send(self.request(Method::GET, &url), &url)
            .await
            .with_context(|| format!("Failed to fetch document {} from {}", document_id, corpus))
    }

    /// Fetch a candidate document in its typed envelope.
    pub async fn get_candidate(&self, document_id: &str) -> Result<CorpusDocument> {
        let value = self.get_document(Corpus::Candidates, document_id).await?;
        serde_json::from_value(value).context("Failed to parse candidate document")
    }

    pub async fn list_document_ids(&self, corpus: Corpus) -> Result<Value> {
        let url = self.corpus_endpoint(corpus, "documents")?;
        self.send(self.request(Method::GET, &url), &url)
            .await
            .with_context(|| format!("Failed to list documents in {}", corpus))
    }

    pub async fn delete_document(&self, corpus: Corpus, document_id: &str) -> Result<Value> {
        let url = self.document_url(corpus, document_id)?;
        self.send(self.request(Method::DELETE, &url), &url)
            .await
            .with_context(|| format!("Failed to delete document {} from {}", document_id, corpus))
    }

    /// Documents in `corpus` conceptually related to the documents in `ids`.
    pub async fn semantic_search(
        &self,
        corpus: Corpus,
        ids: &[String],
        limit: u32,
        extra: &[(String, String)],
    ) -> Result<Value> {
        let url = self.corpus_endpoint(corpus, "conceptual_search")?;
        let query = search_query(ids, limit, extra)?;
        trace!("Semantic search in {} with {:?}", corpus, query);

        self.send(self.request(Method::GET, &url).query(&query), &url)
            .await
            .with_context(|| format!("Semantic search in {} failed", corpus))
    }

    /// Metadata for each concept id (e.g. `/graphs/wikipedia/en-20120601/concepts/Rust`).
    pub async fn concepts_metadata(
        &self,
        concept_ids: &[String],
        extra: &[(String, String)],
    ) -> Result<Value> {
        let mut concepts = Vec::with_capacity(concept_ids.len());
        for concept_id in concept_ids {
            let url = self.concept_url(concept_id)?;
            let concept = self
                .send(self.request(Method::GET, &url).query(extra), &url)
                .await
                .with_context(|| format!("Failed to fetch concept {}", concept_id))?;
            concepts.push(concept);
        }
        Ok(Value::Array(concepts))
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Value> {
        info!("Calling concept insights: {}", url);

        let response = request
            .send()
            .await
            .context("HTTP request to concept insights failed")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        trace!("Concept insights responded {}", status);

        if !status.is_success() {
            error!("Concept insights error {}: {}", status, text);
            return Err(ServiceError {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

/// Query for a conceptual search. `extra` entries override the defaults;
/// `ids` is always sent JSON-encoded.
pub fn search_query(
    ids: &[String],
    limit: u32,
    extra: &[(String, String)],
) -> Result<Vec<(String, String)>> {
    let mut ids_json = serde_json::to_string(ids).context("Failed to encode ids")?;
    let mut limit = limit.to_string();
    let mut rest = Vec::new();

    for (key, value) in extra {
        match key.as_str() {
            "ids" => ids_json = encode_ids_param(value)?,
            "limit" => limit = value.clone(),
            _ => rest.push((key.clone(), value.clone())),
        }
    }

    let mut query = vec![("ids".to_string(), ids_json), ("limit".to_string(), limit)];
    query.extend(rest);
    Ok(query)
}

/// Accept either a JSON array or a single bare id, always producing a JSON array.
pub fn encode_ids_param(raw: &str) -> Result<String> {
    let ids = parse_ids(raw);
    serde_json::to_string(&ids).context("Failed to encode ids")
}

pub fn parse_ids(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => ids,
        Err(_) => raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConceptInsightsConfig {
        ConceptInsightsConfig {
            url: "https://ci.example.com/api/v2/".to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
            account: "acct".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_urls() {
        let client = ConceptInsightsClient::new(&config()).unwrap();
        assert_eq!(
            client.corpus_url(Corpus::Jobs).unwrap().as_str(),
            "https://ci.example.com/api/v2/corpora/acct/jobs"
        );
        assert_eq!(
            client.document_url(Corpus::Candidates, "42").unwrap().as_str(),
            "https://ci.example.com/api/v2/corpora/acct/candidates/documents/42"
        );
        assert_eq!(
            client.corpus_endpoint(Corpus::Jobs, "conceptual_search").unwrap().as_str(),
            "https://ci.example.com/api/v2/corpora/acct/jobs/conceptual_search"
        );
    }

    #[test]
    fn test_document_id_stays_inside_its_corpus() {
        let client = ConceptInsightsClient::new(&config()).unwrap();

        let url = client
            .document_url(Corpus::Jobs, "../../candidates/documents/x")
            .unwrap();
        assert!(url.path().starts_with("/api/v2/corpora/acct/jobs/documents/"));
        assert_eq!(url.path_segments().map(|s| s.count()), Some(7));
        assert!(!url.path().contains("/candidates/"));

        let url = client.document_url(Corpus::Jobs, "a?b").unwrap();
        assert_eq!(url.query(), None);
        assert_eq!(url.path(), "/api/v2/corpora/acct/jobs/documents/a%3Fb");

        assert!(client.document_url(Corpus::Jobs, "..").is_err());
        assert!(client.document_url(Corpus::Jobs, "").is_err());
    }

    #[test]
    fn test_concept_url_keeps_graph_path() {
        let client = ConceptInsightsClient::new(&config()).unwrap();
        assert_eq!(
            client
                .concept_url("/graphs/wikipedia/en-20120601/concepts/Rust")
                .unwrap()
                .as_str(),
            "https://ci.example.com/api/v2/graphs/wikipedia/en-20120601/concepts/Rust"
        );
        assert_eq!(
            client.concept_url("graphs/g/concepts/C?x").unwrap().path(),
            "/api/v2/graphs/g/concepts/C%3Fx"
        );
        assert!(client.concept_url("/graphs/../corpora/acct").is_err());
        assert!(client.concept_url("/").is_err());
    }

    #[test]
    fn test_search_query_defaults() {
        let ids = vec!["/corpus/acct/candidates/42".to_string()];
        let query = search_query(&ids, 5, &[]).unwrap();
        assert_eq!(
            query,
            vec![
                ("ids".to_string(), r#"["/corpus/acct/candidates/42"]"#.to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_query_extra_overrides() {
        let ids = vec!["a".to_string()];
        let extra = vec![
            ("limit".to_string(), "20".to_string()),
            ("cursor".to_string(), "10".to_string()),
        ];
        let query = search_query(&ids, 5, &extra).unwrap();
        assert_eq!(query[1], ("limit".to_string(), "20".to_string()));
        assert_eq!(query[2], ("cursor".to_string(), "10".to_string()));
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids(r#"["x","y"]"#), vec!["x", "y"]);
        assert_eq!(parse_ids("x, y"), vec!["x", "y"]);
        assert_eq!(encode_ids_param("solo").unwrap(), r#"["solo"]"#);
    }

    #[test]
    fn test_service_error_found_through_context() {
        let err: anyhow::Error = ServiceError {
            status: 404,
            body: "missing".to_string(),
        }
        .into();
        let err = err.context("Failed to fetch document");
        assert_eq!(ServiceError::find(&err).map(|e| e.status), Some(404));
    }
}
