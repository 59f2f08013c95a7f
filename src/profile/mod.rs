// src/profile/mod.rs
//! Profile normalization: assemble a loose narrative blob, then canonicalize it

pub mod cleaner;
pub mod normalizer;

pub use cleaner::{clean, CleanMode, TextCleaner};
pub use normalizer::{
    normalize_raw_text, normalize_structured, HonorsSource, Normalizer, NormalizerOptions,
};
