// src/core/mod.rs
//! Configuration and the concept-insights service client

pub mod concept_insights;
pub mod config_manager;

pub use concept_insights::{ConceptInsightsClient, ServiceError};
pub use config_manager::ConfigManager;
