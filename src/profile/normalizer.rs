// src/profile/normalizer.rs
//! Flattens provider profiles and pasted text into a `CanonicalProfile`.
//!
//! Assembly is deliberately loose: every item field is followed by ", " and
//! every section by ". ", including empty ones. The `TextCleaner` collapses
//! the resulting separator noise afterwards.

use tracing::debug;

use super::cleaner::{CleanMode, TextCleaner};
use crate::types::source_profile::{Collection, SourceProfile};
use crate::types::{CanonicalProfile, RawTextProfile, PLACEHOLDER_PICTURE_URL};

/// Where the honors/awards section reads its entries from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HonorsSource {
    /// Index into the skills list using the honors count, reading each skill
    /// entry's top-level `name`. Reproduces the text already indexed.
    #[default]
    Skills,
    /// Read the honors/awards list itself.
    HonorsAwards,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizerOptions {
    pub honors_source: HonorsSource,
    pub clean_mode: CleanMode,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    options: NormalizerOptions,
    cleaner: TextCleaner,
}

/// Accumulates the narrative blob.
#[derive(Default)]
struct Blob(String);

impl Blob {
    fn sentence(&mut self, value: Option<&str>) {
        self.0.push_str(value.unwrap_or(""));
        self.0.push_str(". ");
    }

    fn item(&mut self, value: Option<&str>) {
        self.0.push_str(value.unwrap_or(""));
        self.0.push_str(", ");
    }

    fn close(&mut self) {
        self.0.push_str(". ");
    }

    fn section<T>(
        &mut self,
        name: &str,
        collection: Option<&Collection<T>>,
        mut each: impl FnMut(&mut Self, &T),
    ) {
        if let Some(collection) = collection {
            debug!("Profile has {} ({} entries)", name, collection.total);
            for entry in collection.counted() {
                each(self, entry);
            }
            self.close();
        }
    }
}

impl Normalizer {
    pub fn new(options: NormalizerOptions) -> Self {
        Self {
            options,
            cleaner: TextCleaner::new(options.clean_mode),
        }
    }

    pub fn options(&self) -> NormalizerOptions {
        self.options
    }

    pub fn clean(&self, text: &str) -> String {
        self.cleaner.clean(text)
    }

    pub fn normalize_structured(&self, profile: &SourceProfile) -> CanonicalProfile {
        let mut blob = Blob::default();

        blob.sentence(profile.summary.as_deref());
        blob.sentence(profile.associations.as_deref());

        blob.section("certifications", profile.certifications.as_ref(), |b, c| {
            b.item(c.name.as_deref())
        });
        blob.section("courses", profile.courses.as_ref(), |b, c| {
            b.item(c.name.as_deref())
        });
        blob.section("educations", profile.educations.as_ref(), |b, e| {
            b.item(e.field_of_study.as_deref());
            b.item(e.degree.as_deref());
            b.item(e.notes.as_deref());
        });
        self.push_honors(&mut blob, profile);

        blob.sentence(profile.industry.as_deref());
        blob.sentence(profile.interests.as_deref());

        blob.section("languages", profile.languages.as_ref(), |b, l| {
            b.item(l.language.as_ref().and_then(|lang| lang.name.as_deref()))
        });

        blob.sentence(profile.location.as_ref().and_then(|l| l.name.as_deref()));

        blob.section("positions", profile.positions.as_ref(), |b, p| {
            b.item(p.title.as_deref());
            b.item(p.summary.as_deref());
        });
        blob.section("projects", profile.projects.as_ref(), |b, p| {
            b.item(p.name.as_deref());
            b.item(p.description.as_deref());
        });
        blob.section("publications", profile.publications.as_ref(), |b, p| {
            b.item(p.title.as_deref());
            b.item(p.summary.as_deref());
        });
        blob.section("patents", profile.patents.as_ref(), |b, p| {
            b.item(p.title.as_deref());
            b.item(p.summary.as_deref());
        });
        blob.section(
            "recommendations",
            profile.recommendations_received.as_ref(),
            |b, r| b.item(r.recommendation_text.as_deref()),
        );
        blob.section("skills", profile.skills.as_ref(), |b, s| {
            b.item(s.skill.as_ref().and_then(|skill| skill.name.as_deref()))
        });

        blob.sentence(profile.specialties.as_deref());

        CanonicalProfile {
            id: profile.id.clone().unwrap_or_default(),
            full_name: profile.formatted_name.clone().unwrap_or_default(),
            headline: profile.headline.clone().unwrap_or_default(),
            picture_url: profile.picture_url.clone().unwrap_or_default(),
            public_profile_url: profile.public_profile_url.clone().unwrap_or_default(),
            email_address: profile.email_address.clone().unwrap_or_default(),
            data: self.cleaner.clean(&blob.0),
        }
    }

    fn push_honors(&self, blob: &mut Blob, profile: &SourceProfile) {
        let Some(honors) = profile.honors_awards.as_ref() else {
            return;
        };
        debug!("Profile has honors/awards ({} entries)", honors.total);

        match self.options.honors_source {
            HonorsSource::Skills => {
                let skills = profile
                    .skills
                    .as_ref()
                    .map(|skills| skills.values.as_slice())
                    .unwrap_or_default();
                for entry in skills.iter().take(honors.total) {
                    blob.item(entry.name.as_deref());
                }
            }
            HonorsSource::HonorsAwards => {
                for award in honors.counted() {
                    blob.item(award.name.as_deref());
                }
            }
        }
        blob.close();
    }

    pub fn normalize_raw_text(&self, profile: &RawTextProfile) -> CanonicalProfile {
        CanonicalProfile {
            id: profile.id.clone().unwrap_or_default(),
            full_name: profile.name.clone(),
            headline: String::new(),
            picture_url: profile
                .picture_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_PICTURE_URL.to_string()),
            public_profile_url: profile.public_profile_url.clone().unwrap_or_default(),
            email_address: profile.email_address.clone().unwrap_or_default(),
            data: self.cleaner.clean(&profile.text),
        }
    }
}

/// Normalize a provider profile with the default options.
pub fn normalize_structured(profile: &SourceProfile) -> CanonicalProfile {
    Normalizer::default().normalize_structured(profile)
}

/// Normalize pasted text with the default options.
pub fn normalize_raw_text(profile: &RawTextProfile) -> CanonicalProfile {
    Normalizer::default().normalize_raw_text(profile)
}
