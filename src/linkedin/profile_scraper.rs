// src/linkedin/profile_scraper.rs
//! Visible text of a public profile page

use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{info, warn};

const PROFILE_SECTION_SELECTORS: [&str; 8] = [
    "#summary",
    "#experience",
    "#education",
    "#skills",
    "#projects",
    "#certifications",
    "#languages",
    "section.profile-section",
];

const FALLBACK_SELECTORS: [&str; 3] = ["main", "#profile", "body"];

/// Fewer characters than this is treated as an empty or blocked page.
const MIN_TEXT_LEN: usize = 20;

pub struct ProfileScraper {
    client: Client,
}

impl ProfileScraper {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch `url` and return its profile text, or `None` when the page has none.
    pub async fn fetch_profile_text(&self, url: &str) -> Result<Option<String>> {
        info!("Fetching public profile: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch public profile")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;

        let text = extract_profile_text(&html);
        if text.is_none() {
            warn!("No profile text found at {}", url);
        }
        Ok(text)
    }
}

/// Join the text of every profile section, one section per line. Falls back
/// to the page's main content when no section matches.
pub fn extract_profile_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let sections = section_texts(&document);

    let text = if sections.is_empty() {
        FALLBACK_SELECTORS
            .iter()
            .find_map(|selector| select_text(&document, selector))?
    } else {
        sections.join("\n")
    };

    (text.len() >= MIN_TEXT_LEN).then_some(text)
}

/// Text of each element matched by a section selector. Elements matched by an
/// earlier selector win; anything overlapping them is skipped.
fn section_texts(document: &Html) -> Vec<String> {
    let mut taken = Vec::new();
    let mut seen = HashSet::new();

    for selector in PROFILE_SECTION_SELECTORS {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };
        for element in document.select(&selector) {
            let covered = element
                .ancestors()
                .chain(element.descendants())
                .any(|node| seen.contains(&node.id()));
            if covered || !seen.insert(element.id()) {
                continue;
            }
            taken.push(element);
        }
    }

    taken
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let text = document
        .select(&selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    (!text.is_empty()).then_some(text)
}

fn element_text(element: ElementRef<'_>) -> String {
    squash_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_profile_sections_in_order() {
        let html = r#"
            <html><body>
              <nav>Sign in Join now</nav>
              <section id="skills"><h2>Skills</h2><ul><li>Rust</li><li>Kafka</li></ul></section>
              <section id="summary"><p>Backend   engineer
                 focused on data systems.</p></section>
            </body></html>"#;

        let text = extract_profile_text(html).unwrap();
        assert_eq!(
            text,
            "Backend engineer focused on data systems.\nSkills Rust Kafka"
        );
        assert!(!text.contains("Sign in"));
    }

    #[test]
    fn test_section_matched_by_id_and_class_is_emitted_once() {
        let html = r#"<section id="summary" class="profile-section"><p>Backend engineer on data systems</p></section>"#;
        assert_eq!(
            extract_profile_text(html).as_deref(),
            Some("Backend engineer on data systems")
        );
    }

    #[test]
    fn test_nested_section_is_not_repeated() {
        let html = r#"
            <section class="profile-section">
              <div id="experience"><p>Engineer at Acme building APIs</p></div>
            </section>
            <section id="languages" class="profile-section"><p>English Portuguese</p></section>"#;
        assert_eq!(
            extract_profile_text(html).unwrap(),
            "Engineer at Acme building APIs\nEnglish Portuguese"
        );
    }

    #[test]
    fn test_falls_back_to_main_content() {
        let html = "<html><body><main><h1>Ana Lima</h1><p>Platform engineer in Lisbon</p></main></body></html>";
        let text = extract_profile_text(html).unwrap();
        assert_eq!(text, "Ana Lima Platform engineer in Lisbon");
    }

    #[test]
    fn test_blocked_page_yields_none() {
        assert!(extract_profile_text("<html><body><p>Join</p></body></html>").is_none());
    }
}
