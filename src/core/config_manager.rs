// src/core/config_manager.rs
//! Configuration: optional config.yaml per environment, overridden by env vars

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::profile::{CleanMode, HonorsSource, NormalizerOptions};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CONCEPT_INSIGHTS_URL: &str =
    "https://gateway.watsonplatform.net/concept-insights/api/v2";
const DEFAULT_LINKEDIN_API_URL: &str = "https://api.linkedin.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub port: u16,
    pub concept_insights: ConceptInsightsConfig,
    pub linkedin: LinkedInConfig,
    pub normalizer: NormalizerOptions,
}

#[derive(Debug, Clone)]
pub struct ConceptInsightsConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Account id used in corpus paths. Defaults to the username.
    pub account: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct LinkedInConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
}

/// One environment section of config.yaml. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSettings {
    pub port: Option<u16>,
    pub concept_insights_url: Option<String>,
    pub concept_insights_username: Option<String>,
    pub concept_insights_password: Option<String>,
    pub concept_insights_account: Option<String>,
    pub linkedin_api_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub honors_from_skills: Option<bool>,
    pub clean_to_fixpoint: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSettings,
    #[serde(default)]
    production: FileSettings,
}

impl ConfigManager {
    /// Load config.yaml from the working directory (if any) and the process environment.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let file = Self::load_file(Path::new("config.yaml"), &environment)?;
        Self::from_sources(environment, file, |key| std::env::var(key).ok())
    }

    fn get_environment() -> String {
        std::env::var("TALENT_MATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_file(path: &Path, environment: &str) -> Result<FileSettings> {
        if !path.exists() {
            return Ok(FileSettings::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_file(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse_file(content: &str, environment: &str) -> Result<FileSettings> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    /// Merge file settings with variables from `env`, which take precedence.
    pub fn from_sources(
        environment: String,
        file: FileSettings,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let port = match env("ROCKET_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let timeout_seconds = match env("SERVICE_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("SERVICE_TIMEOUT_SECONDS must be a number"))?,
            None => file.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let honors_from_skills = match env("HONORS_FROM_SKILLS") {
            Some(raw) => parse_flag("HONORS_FROM_SKILLS", &raw)?,
            None => file.honors_from_skills.unwrap_or(true),
        };
        let clean_to_fixpoint = match env("CLEAN_TO_FIXPOINT") {
            Some(raw) => parse_flag("CLEAN_TO_FIXPOINT", &raw)?,
            None => file.clean_to_fixpoint.unwrap_or(false),
        };

        let username = env("CONCEPT_INSIGHTS_USERNAME")
            .or(file.concept_insights_username)
            .unwrap_or_default();
        let account = env("CONCEPT_INSIGHTS_ACCOUNT")
            .or(file.concept_insights_account)
            .unwrap_or_else(|| username.clone());

        Ok(Self {
            environment,
            port,
            concept_insights: ConceptInsightsConfig {
                url: env("CONCEPT_INSIGHTS_URL")
                    .or(file.concept_insights_url)
                    .unwrap_or_else(|| DEFAULT_CONCEPT_INSIGHTS_URL.to_string()),
                password: env("CONCEPT_INSIGHTS_PASSWORD")
                    .or(file.concept_insights_password)
                    .unwrap_or_default(),
                username,
                account,
                timeout_seconds,
            },
            linkedin: LinkedInConfig {
                api_url: env("LINKEDIN_API_URL")
                    .or(file.linkedin_api_url)
                    .unwrap_or_else(|| DEFAULT_LINKEDIN_API_URL.to_string()),
                timeout_seconds,
            },
            normalizer: NormalizerOptions {
                honors_source: if honors_from_skills {
                    HonorsSource::Skills
                } else {
                    HonorsSource::HonorsAwards
                },
                clean_mode: if clean_to_fixpoint {
                    CleanMode::Fixpoint
                } else {
                    CleanMode::SinglePass
                },
            },
        })
    }

    /// The server cannot reach the corpora without credentials.
    pub fn ensure_service_credentials(&self) -> Result<()> {
        if self.concept_insights.username.trim().is_empty() {
            anyhow::bail!("CONCEPT_INSIGHTS_USERNAME environment variable not set");
        }
        if self.concept_insights.password.is_empty() {
            anyhow::bail!("CONCEPT_INSIGHTS_PASSWORD environment variable not set");
        }
        Ok(())
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{} must be a boolean, got '{}'", key, raw),
    }
}
