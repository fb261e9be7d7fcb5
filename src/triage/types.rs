use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corpus::{CorpusError, Disease, Symptom};
use crate::inference::{AggregateError, CareHint, DiagnosisCandidate, SeverityError, SeverityVerdict};

fn default_duration_days() -> u32 {
    1
}

/// Input to [`super::TriageEngine::diagnose`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnoseRequest {
    /// Free-text complaint, or a disease name.
    pub text: String,
    /// Explicit disease name; skips symptom extraction when it resolves.
    #[serde(default)]
    pub known_disease: Option<String>,
    #[serde(default = "default_duration_days")]
    pub duration_days: u32,
    #[serde(default)]
    pub age: Option<u32>,
}

impl DiagnoseRequest {
    pub fn from_text(text: impl Into<String>, duration_days: u32) -> Self {
        Self {
            text: text.into(),
            known_disease: None,
            duration_days,
            age: None,
        }
    }
}

/// How the primary disease was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisSource {
    Symptoms,
    DiseaseName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub primary_disease: Disease,
    pub confidence: f64,
    pub secondary_diseases: Vec<Disease>,
    /// Canonical symptoms extracted from the input; empty on the
    /// disease-name path.
    pub symptoms_matched: Vec<Symptom>,
    pub candidates: Vec<DiagnosisCandidate>,
    pub severity_verdict: SeverityVerdict,
    pub severity_score: f64,
    pub condition: String,
    /// Secondary classifier's view of the same symptoms.
    pub secondary_prediction: Option<Disease>,
    pub result_message: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub care_hints: Vec<CareHint>,
    pub followup_questions: Vec<String>,
    pub source: DiagnosisSource,
}

/// Input to [`super::TriageEngine::process_followup`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowupRequest {
    pub disease: Option<String>,
    /// Question text to the user's answer.
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowupOutcome {
    pub disease: String,
    pub emergency: bool,
    pub affirmative_answers: usize,
    pub condition: String,
    pub result_message: String,
    pub description: String,
    pub precautions: Vec<String>,
}

/// Accuracy of both trees, measured once at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub cases: usize,
    pub symptoms: usize,
    pub diseases: usize,
    pub primary_nodes: usize,
    pub primary_depth: usize,
    pub secondary_nodes: usize,
    pub secondary_depth: usize,
    /// `None` when no cases were held out.
    pub primary_holdout_accuracy: Option<f64>,
    pub secondary_holdout_accuracy: Option<f64>,
    /// `None` without a testing table.
    pub primary_testing_accuracy: Option<f64>,
    pub secondary_testing_accuracy: Option<f64>,
}

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("No symptom or disease recognized in the input")]
    NoSymptomsRecognized,

    #[error("Evidence could not be turned into a diagnosis: {0}")]
    UndiagnosableEvidence(#[from] AggregateError),

    #[error("No severity weight for symptom '{0}'")]
    MissingSeverityWeight(Symptom),

    #[error("Reference corpus failed to load: {0}")]
    CorpusLoadFailure(#[from] CorpusError),
}

impl From<SeverityError> for TriageError {
    fn from(err: SeverityError) -> Self {
        match err {
            SeverityError::MissingSeverityWeight(symptom) => Self::MissingSeverityWeight(symptom),
        }
    }
}

impl TriageError {
    /// Whether re-prompting the user can fix this.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoSymptomsRecognized)
    }
}
