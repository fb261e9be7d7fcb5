//! Reference corpus: the immutable disease/symptom tables every inference
//! call reads from.
//!
//! Loaded once at startup (see [`loader`]), validated into a
//! [`ReferenceCorpus`], then shared read-only.

pub mod loader;
pub mod reference;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use reference::{EncodedCase, ReferenceCorpus};
pub use types::{
    CorpusError, Disease, DiseaseGuidance, ReferenceData, Symptom, TrainingCase, TrainingTable,
};
