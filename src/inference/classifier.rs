//! Secondary classifier: a second, independently trained tree queried with
//! the whole symptom vector at once. Only used to corroborate or contradict
//! the primary verdict.

use crate::corpus::{Disease, ReferenceCorpus, Symptom};

use super::tree::DecisionTree;

#[derive(Debug, Clone)]
pub struct SecondaryClassifier {
    tree: DecisionTree,
}

impl SecondaryClassifier {
    pub fn new(tree: DecisionTree) -> Self {
        Self { tree }
    }

    /// Dense 0/1 vector over the universe; symptoms outside it are ignored.
    pub fn feature_vector(corpus: &ReferenceCorpus, symptoms: &[Symptom]) -> Vec<bool> {
        let mut features = vec![false; corpus.symptoms().len()];
        for symptom in symptoms {
            match corpus.symptom_index(symptom) {
                Some(idx) => features[idx] = true,
                None => tracing::debug!(symptom = %symptom, "Symptom outside universe ignored"),
            }
        }
        features
    }

    pub fn predict(&self, corpus: &ReferenceCorpus, symptoms: &[Symptom]) -> Option<Disease> {
        let features = Self::feature_vector(corpus, symptoms);
        self.tree
            .predict(&features)
            .and_then(|idx| corpus.disease(idx))
            .cloned()
    }
}
