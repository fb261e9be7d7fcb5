use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Symptom
// ---------------------------------------------------------------------------

/// Canonical symptom identifier.
///
/// Lower-case, trimmed, with every run of spaces/underscores collapsed into a
/// single underscore: `"Spotting_ urination"` and `"spotting urination"` both
/// become `spotting_urination`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symptom(String);

impl Symptom {
    pub fn new(raw: &str) -> Self {
        Self(normalize_symptom(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Space-separated form used for substring matching against prose.
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symptom {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

pub fn normalize_symptom(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

// ---------------------------------------------------------------------------
// Disease
// ---------------------------------------------------------------------------

/// Canonical disease label (trimmed, original casing kept for display).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disease(String);

impl Disease {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive key for side-table lookups.
    pub fn key(&self) -> String {
        disease_key(&self.0)
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Disease {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

pub fn disease_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Raw tables handed over by the loader
// ---------------------------------------------------------------------------

/// Case table: one boolean per symptom column plus the disease label.
#[derive(Debug, Clone, Default)]
pub struct TrainingTable {
    /// Canonical symptom per feature column, deduplicated, in first-seen order.
    pub symptoms: Vec<Symptom>,
    pub cases: Vec<TrainingCase>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingCase {
    /// Dense presence vector aligned with `TrainingTable::symptoms`.
    pub present: Vec<bool>,
    pub disease: Disease,
}

impl TrainingTable {
    /// Build a table from sparse case descriptions (symptom names per case).
    /// Symptom order is first-seen order across the cases.
    pub fn from_cases<'a, I, S>(cases: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, S)>,
        S: IntoIterator<Item = &'a str>,
    {
        let mut symptoms: Vec<Symptom> = Vec::new();
        let mut sparse: Vec<(Disease, Vec<usize>)> = Vec::new();

        for (disease, names) in cases {
            let mut indices = Vec::new();
            for name in names {
                let symptom = Symptom::new(name);
                let idx = match symptoms.iter().position(|s| *s == symptom) {
                    Some(idx) => idx,
                    None => {
                        symptoms.push(symptom);
                        symptoms.len() - 1
                    }
                };
                indices.push(idx);
            }
            sparse.push((Disease::new(disease), indices));
        }

        let width = symptoms.len();
        let cases = sparse
            .into_iter()
            .map(|(disease, indices)| {
                let mut present = vec![false; width];
                for idx in indices {
                    present[idx] = true;
                }
                TrainingCase { present, disease }
            })
            .collect();

        Self { symptoms, cases }
    }
}

/// Disease → description and precaution text.
#[derive(Debug, Clone, Default)]
pub struct DiseaseGuidance {
    pub descriptions: Vec<(Disease, String)>,
    pub precautions: Vec<(Disease, Vec<String>)>,
}

/// Everything the core consumes at startup, before validation.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub training: TrainingTable,
    /// Optional independent evaluation table (same columns as training).
    pub testing: Option<TrainingTable>,
    pub severity: Vec<(Symptom, u32)>,
    pub guidance: DiseaseGuidance,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Reference file load failed ({0}): {1}")]
    Load(String, String),

    #[error("Reference file parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Training table is empty")]
    EmptyTrainingTable,

    #[error("Training table has no label column")]
    MissingLabelColumn,

    #[error("Case {row} has {found} symptom values, expected {expected}")]
    RaggedCase {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Severity weight for '{0}' must be a positive integer")]
    NonPositiveWeight(Symptom),

    #[error("No severity weight for tree feature '{0}'")]
    MissingSeverityWeight(Symptom),

    #[error("Testing table column '{0}' is not in the symptom universe")]
    UnknownTestingSymptom(Symptom),
}
