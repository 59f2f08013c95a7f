// src/types/profile.rs
use serde::{Deserialize, Serialize};

/// Picture used when a pasted-text profile carries none.
pub const PLACEHOLDER_PICTURE_URL: &str = "/images/user.png";

/// Candidate description pasted or scraped as free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextProfile {
    pub id: Option<String>,
    pub name: String,
    pub picture_url: Option<String>,
    pub public_profile_url: Option<String>,
    pub email_address: Option<String>,
    pub text: String,
}

/// Normalized profile, ready for indexing and display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub picture_url: String,
    #[serde(default)]
    pub public_profile_url: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub data: String,
}
