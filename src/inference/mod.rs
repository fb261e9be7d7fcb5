pub mod aggregate;
pub mod care;
pub mod classifier;
pub mod followup;
pub mod lexicon;
pub mod severity;
pub mod split;
pub mod train;
pub mod tree;
pub mod types;

pub use aggregate::aggregate;
pub use care::{care_hints, CareHint};
pub use classifier::SecondaryClassifier;
pub use followup::{followup_questions, FollowupAssessment};
pub use tree::{DecisionNode, DecisionTree};
pub use types::{
    AggregateError, AggregatedResult, DiagnosisCandidate, SeverityAssessment, SeverityError,
    SeverityVerdict, TreeWalk,
};
