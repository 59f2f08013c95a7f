// src/types/source_profile.rs
//! Structured profile as returned by the professional-network provider

use serde::{Deserialize, Serialize};

/// A counted, ordered sub-collection in the provider's `{ _total, values }` shape.
///
/// A sub-collection is "present" when its key exists on the profile, even if
/// `_total` is zero or missing. `values` defaults to empty when the provider
/// omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(rename = "_total", default)]
    pub total: usize,
    #[serde(default)]
    pub values: Vec<T>,
}

impl<T> Collection<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self {
            total: values.len(),
            values,
        }
    }

    /// Items in positional order, `_total` of them, stopping early if the
    /// provider sent fewer values than it counted.
    pub fn counted(&self) -> impl Iterator<Item = &T> {
        self.values.iter().take(self.total)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            total: 0,
            values: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub field_of_study: Option<String>,
    pub degree: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language: Option<Named>,
}

/// Positions, publications and patents share the same shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitledEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommendation_text: Option<String>,
}

/// Skill entries nest the name under `skill`. The top-level `name` is
/// normally absent; it is only read when honors are sourced from skills.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: Option<String>,
    pub skill: Option<Named>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceProfile {
    pub id: Option<String>,
    pub formatted_name: Option<String>,
    pub headline: Option<String>,
    pub picture_url: Option<String>,
    pub public_profile_url: Option<String>,
    pub email_address: Option<String>,

    pub summary: Option<String>,
    pub associations: Option<String>,
    pub industry: Option<String>,
    pub interests: Option<String>,
    pub specialties: Option<String>,
    pub location: Option<Location>,

    pub certifications: Option<Collection<Named>>,
    pub courses: Option<Collection<Named>>,
    pub educations: Option<Collection<Education>>,
    pub honors_awards: Option<Collection<Named>>,
    pub languages: Option<Collection<LanguageEntry>>,
    pub positions: Option<Collection<TitledEntry>>,
    pub projects: Option<Collection<Project>>,
    pub publications: Option<Collection<TitledEntry>>,
    pub patents: Option<Collection<TitledEntry>>,
    pub recommendations_received: Option<Collection<Recommendation>>,
    pub skills: Option<Collection<SkillEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_json_shape() {
        let json = r#"{
            "id": "abc",
            "formattedName": "Ana Lima",
            "location": { "name": "Lisbon" },
            "educations": { "_total": 1, "values": [{ "fieldOfStudy": "Physics", "degree": "MSc" }] },
            "skills": { "_total": 2, "values": [{ "skill": { "name": "Rust" } }, { "skill": { "name": "SQL" } }] },
            "courses": { "_total": 0 }
        }"#;

        let profile: SourceProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.formatted_name.as_deref(), Some("Ana Lima"));
        assert_eq!(
            profile.location.unwrap().name.as_deref(),
            Some("Lisbon")
        );

        let educations = profile.educations.unwrap();
        assert_eq!(educations.total, 1);
        assert_eq!(educations.values[0].field_of_study.as_deref(), Some("Physics"));

        let skills = profile.skills.unwrap();
        assert_eq!(skills.counted().count(), 2);

        let courses = profile.courses.expect("present key with zero total");
        assert_eq!(courses.total, 0);
        assert!(courses.values.is_empty());

        assert!(profile.certifications.is_none());
        assert!(profile.honors_awards.is_none());
    }

    #[test]
    fn test_counted_stops_at_values_end() {
        let collection = Collection {
            total: 5,
            values: vec![Named::default(), Named::default()],
        };
        assert_eq!(collection.counted().count(), 2);

        let collection = Collection {
            total: 1,
            values: vec![Named::default(), Named::default()],
        };
        assert_eq!(collection.counted().count(), 1);
    }
}
