use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corpus::{Disease, Symptom};

/// Outcome of one single-symptom tree walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeWalk {
    pub asserted: Symptom,
    pub disease: Disease,
    pub disease_index: usize,
    /// Features recorded while descending right.
    pub trail: Vec<Symptom>,
    /// Expected symptom set of `disease` in the corpus.
    pub corpus_row: Vec<Symptom>,
}

impl TreeWalk {
    /// |trail ∩ corpus row| / max(|corpus row|, 1)
    pub fn confidence(&self) -> f64 {
        let matched = self
            .trail
            .iter()
            .filter(|s| self.corpus_row.contains(s))
            .count();
        matched as f64 / self.corpus_row.len().max(1) as f64
    }
}

/// One disease in the aggregated ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisCandidate {
    pub disease: Disease,
    /// Trail symptoms (deduplicated) from every walk that reached this disease.
    pub matched_symptoms: Vec<Symptom>,
    /// Sum of per-walk confidences.
    pub summed_confidence: f64,
    /// Number of walks that reached this disease.
    pub walks: usize,
}

/// Ranked multi-symptom evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// Highest summed confidence first; ties keep first-reached order.
    pub ranked: Vec<DiagnosisCandidate>,
    /// Winner's summed confidence / number of walks performed, in `[0, 1]`.
    pub confidence: f64,
    pub walks_performed: usize,
}

impl AggregatedResult {
    /// Top-ranked candidate; `None` only for an empty ranking.
    pub fn primary(&self) -> Option<&DiagnosisCandidate> {
        self.ranked.first()
    }

    /// Every other distinct disease reached by any walk.
    pub fn secondary_diseases(&self) -> Vec<Disease> {
        self.ranked.iter().skip(1).map(|c| c.disease.clone()).collect()
    }
}

/// Binary urgency verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityVerdict {
    ConsultDoctor,
    MonitorAndPrecaution,
}

impl SeverityVerdict {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ConsultDoctor => "You should take the consultation from doctor.",
            Self::MonitorAndPrecaution => {
                "It might not be that bad but you should take precautions."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    pub score: f64,
    pub verdict: SeverityVerdict,
}

#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("No tree walk produced a disease")]
    Undiagnosable,
}

#[derive(Error, Debug, PartialEq)]
pub enum SeverityError {
    #[error("No severity weight for symptom '{0}'")]
    MissingSeverityWeight(Symptom),
}
