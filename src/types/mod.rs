// src/types/mod.rs
pub mod corpus;
pub mod profile;
pub mod source_profile;

pub use corpus::{CandidateFields, Corpus, CorpusDocument, DocumentPart, JobPosting};
pub use profile::{CanonicalProfile, RawTextProfile, PLACEHOLDER_PICTURE_URL};
pub use source_profile::SourceProfile;
