//! Care hints derived from disease description and precaution text.
//!
//! Plain substring matching, so a keyword inside an unrelated sentence
//! still counts. Hints are an enrichment for display and never feed the
//! diagnosis or the verdict.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareHint {
    ConsultDoctor,
    Medication,
    Rest,
    Hydration,
    Hygiene,
    Diet,
    Exercise,
    Cooling,
    Vaccination,
}

impl CareHint {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ConsultDoctor => "See a doctor",
            Self::Medication => "Medication",
            Self::Rest => "Rest",
            Self::Hydration => "Hydration",
            Self::Hygiene => "Hygiene",
            Self::Diet => "Diet",
            Self::Exercise => "Exercise",
            Self::Cooling => "Cooling",
            Self::Vaccination => "Vaccination",
        }
    }
}

static CARE_KEYWORDS: &[(CareHint, &[&str])] = &[
    (
        CareHint::ConsultDoctor,
        &["consult", "doctor", "hospital", "physician", "specialist"],
    ),
    (
        CareHint::Medication,
        &["medication", "medicine", "antibiotic", "drug", "tablet", "ointment"],
    ),
    (CareHint::Rest, &["rest", "sleep", "relax"]),
    (
        CareHint::Hydration,
        &["fluid", "water", "drink", "hydrat", "juice"],
    ),
    (
        CareHint::Hygiene,
        &["bath", "wash", "clean", "hygiene", "disinfect", "dry"],
    ),
    (
        CareHint::Diet,
        &["diet", "food", "meal", "avoid oily", "spicy"],
    ),
    (CareHint::Exercise, &["exercise", "walk", "yoga", "stretch"]),
    (
        CareHint::Cooling,
        &["cold compress", "cool", "ice pack", "sponge"],
    ),
    (CareHint::Vaccination, &["vaccin", "immuniz", "immunis"]),
];

/// Categories whose keywords appear in the description or any precaution.
/// Sorted and deduplicated.
pub fn care_hints<S: AsRef<str>>(description: Option<&str>, precautions: &[S]) -> Vec<CareHint> {
    let text = description
        .into_iter()
        .chain(precautions.iter().map(|p| p.as_ref()))
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut hints: Vec<CareHint> = CARE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(hint, _)| *hint)
        .collect();
    hints.sort();
    hints.dedup();
    hints
}
