// src/linkedin/api_client.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{error, info};

use crate::core::config_manager::LinkedInConfig;
use crate::types::SourceProfile;

const BASIC_FIELDS: &str = "id,formatted-name,headline,location,industry,summary,specialties,\
positions,picture-url,public-profile-url,email-address";

const FULL_FIELDS: &str = "associations,interests,projects,publications,patents,languages,skills,\
certifications,educations,courses,volunteer,recommendations-received,honors-awards";

pub struct LinkedInClient {
    client: Client,
    api_url: String,
}

impl LinkedInClient {
    pub fn new(config: &LinkedInConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn profile_url(&self) -> String {
        format!("{}/people/~:({},{})", self.api_url, BASIC_FIELDS, FULL_FIELDS)
    }

    /// Fetch the member's structured profile for an already-issued access token.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<SourceProfile> {
        let url = self.profile_url();
        info!("Fetching LinkedIn profile");

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to send request to LinkedIn")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("LinkedIn API error {}: {}", status, error_text);
            anyhow::bail!("LinkedIn API returned error {}: {}", status, error_text);
        }

        response
            .json::<SourceProfile>()
            .await
            .context("Failed to parse LinkedIn profile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url_requests_every_section() {
        let client = LinkedInClient::new(&LinkedInConfig {
            api_url: "https://api.linkedin.com/v1/".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();

        let url = client.profile_url();
        assert!(url.starts_with("https://api.linkedin.com/v1/people/~:(id,formatted-name,"));
        for field in ["honors-awards", "recommendations-received", "skills", "public-profile-url"] {
            assert!(url.contains(field), "missing {}", field);
        }
        assert!(url.ends_with(")"));
    }
}
