//! Small hand-checked corpus shared by unit tests.
//!
//! Column order: cough, high_fever, chest_pain, chills, sweating, headache,
//! nausea, itching, skin_rash.

use super::reference::ReferenceCorpus;
use super::types::{Disease, DiseaseGuidance, ReferenceData, Symptom, TrainingTable};

pub(crate) fn sample_training() -> TrainingTable {
    TrainingTable::from_cases(vec![
        ("Bronchitis", vec!["cough", "high_fever", "chest_pain"]),
        ("Malaria", vec!["chills", "high_fever", "sweating", "headache"]),
        ("Migraine", vec!["headache", "nausea"]),
        ("Fungal infection", vec!["itching", "skin_rash"]),
    ])
}

pub(crate) fn sample_severity() -> Vec<(Symptom, u32)> {
    [
        ("cough", 4),
        ("high_fever", 7),
        ("chest_pain", 7),
        ("chills", 3),
        ("sweating", 3),
        ("headache", 3),
        ("nausea", 5),
        ("itching", 1),
        ("skin_rash", 3),
    ]
    .into_iter()
    .map(|(s, w)| (Symptom::new(s), w))
    .collect()
}

pub(crate) fn sample_guidance() -> DiseaseGuidance {
    DiseaseGuidance {
        descriptions: vec![
            (
                Disease::new("Bronchitis"),
                "Inflammation of the bronchial tubes causing persistent cough.".into(),
            ),
            (
                Disease::new("Malaria"),
                "A mosquito-borne infection with cycles of fever and chills.".into(),
            ),
            (
                Disease::new("Migraine"),
                "Recurrent headaches often with nausea and light sensitivity.".into(),
            ),
        ],
        precautions: vec![
            (
                Disease::new("Bronchitis"),
                vec!["rest".into(), "drink warm fluids".into(), "consult doctor".into()],
            ),
            (
                Disease::new("Malaria"),
                vec![
                    "consult nearest hospital".into(),
                    "avoid oily food".into(),
                    "keep mosquitos out".into(),
                ],
            ),
            (
                Disease::new("Fungal infection"),
                vec!["bath twice".into(), "keep infected area dry".into(), "".into()],
            ),
        ],
    }
}

pub(crate) fn sample_reference_data() -> ReferenceData {
    ReferenceData {
        training: sample_training(),
        testing: None,
        severity: sample_severity(),
        guidance: sample_guidance(),
    }
}

pub(crate) fn sample_corpus() -> ReferenceCorpus {
    let data = sample_reference_data();
    ReferenceCorpus::build(&data.training, &data.severity, &data.guidance)
        .expect("fixture corpus must build")
}
