//! Triage operations exposed to callers: symptom suggestions, diagnosis and
//! follow-up processing over one immutable [`TriageEngine`].

pub mod engine;
pub mod types;

pub use engine::TriageEngine;
pub use types::{
    DiagnoseRequest, DiagnosisReport, DiagnosisSource, FollowupOutcome, FollowupRequest,
    ModelReport, TriageError,
};
