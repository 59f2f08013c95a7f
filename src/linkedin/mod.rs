// src/linkedin/mod.rs
pub mod api_client;
pub mod profile_scraper;

pub use api_client::LinkedInClient;
pub use profile_scraper::{extract_profile_text, ProfileScraper};
