//! Follow-up questions and the emergency escalation check on their answers.
//!
//! The check fires on the QUESTION text of affirmatively answered questions,
//! so the answers themselves only need to be yes/no.

use serde::{Deserialize, Serialize};

use crate::corpus::Disease;

// ── Keyword sets ────────────────────────────────────────────

static AFFIRMATIVE_ANSWERS: &[&str] = &["yes", "y", "true", "1"];

static EMERGENCY_KEYWORDS: &[&str] = &[
    "difficulty breathing",
    "bleeding",
    "chest pain",
    "unconscious",
    "severe pain",
];

// ── Question tables ─────────────────────────────────────────

static DISEASE_FOLLOWUPS: &[(&str, &[&str])] = &[
    (
        "dengue",
        &[
            "Do you have severe body pain (yes/no)?",
            "Do you have bleeding or bruising (yes/no)?",
            "Have you noticed a rash (yes/no)?",
        ],
    ),
    (
        "malaria",
        &[
            "Do you have chills and high fever (yes/no)?",
            "Do you have sweating episodes (yes/no)?",
        ],
    ),
    (
        "influenza",
        &[
            "Do you have sore throat (yes/no)?",
            "Do you have muscle aches (yes/no)?",
        ],
    ),
    (
        "covid-19",
        &[
            "Do you have difficulty breathing (yes/no)?",
            "Do you have loss of taste or smell (yes/no)?",
        ],
    ),
    (
        "hypertension",
        &[
            "Do you have frequent headaches (yes/no)?",
            "Any chest pain (yes/no)?",
        ],
    ),
    (
        "diabetes",
        &[
            "Do you have increased thirst or urination (yes/no)?",
            "Any slow-healing wounds (yes/no)?",
        ],
    ),
];

static CHILD_FOLLOWUPS: &[&str] = &[
    "Is there poor feeding or persistent vomiting (yes/no)?",
    "Is the child unusually drowsy (yes/no)?",
];

static ELDERLY_FOLLOWUPS: &[&str] = &[
    "Any recent falls or confusion (yes/no)?",
    "Are you having difficulty breathing (yes/no)?",
];

static ADULT_FOLLOWUPS: &[&str] = &[
    "Do you have fever (yes/no)?",
    "Are you experiencing severe pain (yes/no)?",
];

const CHILD_AGE_BELOW: u32 = 12;
const ELDERLY_AGE_FROM: u32 = 65;

/// Yes/no questions to ask after a disease is settled: the disease's own
/// table entry if it has one, else generic questions by age group.
pub fn followup_questions(disease: &Disease, age: Option<u32>) -> Vec<String> {
    let key = disease.key();
    let questions = DISEASE_FOLLOWUPS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, questions)| *questions)
        .unwrap_or(match age {
            Some(age) if age < CHILD_AGE_BELOW => CHILD_FOLLOWUPS,
            Some(age) if age >= ELDERLY_AGE_FROM => ELDERLY_FOLLOWUPS,
            _ => ADULT_FOLLOWUPS,
        });
    questions.iter().map(|q| q.to_string()).collect()
}

/// Result of scanning follow-up answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupAssessment {
    pub emergency: bool,
    /// Number of affirmative answers.
    pub affirmative: usize,
    /// Emergency keywords hit by affirmatively answered questions, sorted.
    pub triggers: Vec<String>,
}

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE_ANSWERS.contains(&answer.as_str())
}

/// Any affirmative answer to a question mentioning an emergency keyword
/// escalates. Order of answers does not matter.
pub fn evaluate<Q, A>(answers: impl IntoIterator<Item = (Q, A)>) -> FollowupAssessment
where
    Q: AsRef<str>,
    A: AsRef<str>,
{
    let mut assessment = FollowupAssessment::default();
    for (question, answer) in answers {
        if !is_affirmative(answer.as_ref()) {
            continue;
        }
        assessment.affirmative += 1;
        let question = question.as_ref().to_lowercase();
        for keyword in EMERGENCY_KEYWORDS {
            if question.contains(keyword) {
                assessment.emergency = true;
                if !assessment.triggers.iter().any(|t| t == keyword) {
                    assessment.triggers.push(keyword.to_string());
                }
            }
        }
    }
    assessment.triggers.sort();
    assessment
}
