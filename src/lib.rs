//! Candidate and job-posting import, normalization and concept-based matching.

pub mod core;
pub mod linkedin;
pub mod profile;
pub mod types;
pub mod web;

pub use crate::core::ConfigManager;
pub use profile::{clean, normalize_raw_text, normalize_structured, Normalizer};
pub use types::{CanonicalProfile, RawTextProfile, SourceProfile};
pub use web::start_web_server;
