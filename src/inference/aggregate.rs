//! Evidence aggregation: one primary-tree walk per extracted symptom, summed
//! per disease.
//!
//! This is an approximation of joint multi-symptom inference: the tree is
//! only ever queried with a single asserted feature and the per-walk
//! confidences are added up.

use crate::corpus::{ReferenceCorpus, Symptom};

use super::tree::DecisionTree;
use super::types::{AggregateError, AggregatedResult, DiagnosisCandidate};

pub fn aggregate(
    symptoms: &[Symptom],
    tree: &DecisionTree,
    corpus: &ReferenceCorpus,
) -> Result<AggregatedResult, AggregateError> {
    // First-reached order is the tie-break, so keep a Vec rather than a map.
    let mut candidates: Vec<DiagnosisCandidate> = Vec::new();

    for symptom in symptoms {
        let Some(walk) = tree.walk(corpus, symptom) else {
            tracing::warn!(symptom = %symptom, "Tree walk produced no disease");
            continue;
        };
        let confidence = walk.confidence();
        tracing::debug!(
            symptom = %symptom,
            disease = %walk.disease,
            confidence,
            "Tree walk"
        );

        let pos = match candidates.iter().position(|c| c.disease == walk.disease) {
            Some(pos) => pos,
            None => {
                candidates.push(DiagnosisCandidate {
                    disease: walk.disease.clone(),
                    matched_symptoms: Vec::new(),
                    summed_confidence: 0.0,
                    walks: 0,
                });
                candidates.len() - 1
            }
        };
        let candidate = &mut candidates[pos];
        candidate.summed_confidence += confidence;
        candidate.walks += 1;
        for s in walk.trail {
            if !candidate.matched_symptoms.contains(&s) {
                candidate.matched_symptoms.push(s);
            }
        }
    }

    if candidates.is_empty() {
        return Err(AggregateError::Undiagnosable);
    }

    // Stable sort: equal sums keep first-reached order.
    candidates.sort_by(|a, b| b.summed_confidence.total_cmp(&a.summed_confidence));

    let walks_performed = symptoms.len();
    let confidence = (candidates[0].summed_confidence / walks_performed as f64).clamp(0.0, 1.0);

    Ok(AggregatedResult {
        ranked: candidates,
        confidence,
        walks_performed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::fixtures::sample_corpus;
    use crate::corpus::Disease;
    use crate::inference::train::{train_tree, TrainParams};
    use crate::inference::tree::DecisionNode;

    fn fixture_tree(corpus: &ReferenceCorpus) -> DecisionTree {
        let rows: Vec<usize> = (0..corpus.cases().len()).collect();
        train_tree(
            corpus.cases(),
            &rows,
            corpus.symptoms().len(),
            corpus.diseases().len(),
            TrainParams::default(),
        )
        .unwrap()
    }

    fn symptoms(names: &[&str]) -> Vec<Symptom> {
        names.iter().map(|n| Symptom::new(n)).collect()
    }

    #[test]
    fn fever_and_cough_picks_bronchitis() {
        let corpus = sample_corpus();
        let tree = fixture_tree(&corpus);
        let result = aggregate(&symptoms(&["high_fever", "cough"]), &tree, &corpus).unwrap();

        assert_eq!(result.primary().unwrap().disease, Disease::new("Bronchitis"));
        assert_eq!(result.walks_performed, 2);
        // cough walk: 1/3, averaged over two walks.
        assert!((result.confidence - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(result.secondary_diseases(), vec![Disease::new("Malaria")]);
        assert_eq!(result.primary().unwrap().matched_symptoms, symptoms(&["cough"]));
    }

    #[test]
    fn repeated_disease_sums_confidence() {
        let corpus = sample_corpus();
        // Both leaves carry Malaria.
        let tree = DecisionTree::from_nodes(vec![
            DecisionNode::Internal {
                feature: 3,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            DecisionNode::Leaf {
                value: vec![0, 1, 0, 0],
            },
            DecisionNode::Leaf {
                value: vec![0, 1, 0, 0],
            },
        ])
        .unwrap();
        let result = aggregate(&symptoms(&["chills", "headache"]), &tree, &corpus).unwrap();
        assert_eq!(result.ranked.len(), 1);
        assert_eq!(result.ranked[0].walks, 2);
        assert!((result.ranked[0].summed_confidence - 0.25).abs() < 1e-12);
        assert!((result.confidence - 0.125).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_first_reached_disease() {
        let corpus = sample_corpus();
        // cough? → Migraine : Malaria. Neither walk matches its corpus row.
        let tree = DecisionTree::from_nodes(vec![
            DecisionNode::Internal {
                feature: 0,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            DecisionNode::Leaf {
                value: vec![0, 1, 0, 0],
            },
            DecisionNode::Leaf {
                value: vec![0, 0, 1, 0],
            },
        ])
        .unwrap();

        let result = aggregate(&symptoms(&["chills", "cough"]), &tree, &corpus).unwrap();
        assert_eq!(result.primary().unwrap().disease, Disease::new("Malaria"));
        assert_eq!(result.confidence, 0.0);

        let result = aggregate(&symptoms(&["cough", "chills"]), &tree, &corpus).unwrap();
        assert_eq!(result.primary().unwrap().disease, Disease::new("Migraine"));
        assert_eq!(result.secondary_diseases(), vec![Disease::new("Malaria")]);
    }

    #[test]
    fn confidence_stays_in_unit_interval() {
        let corpus = sample_corpus();
        let tree = fixture_tree(&corpus);
        for set in [
            vec!["cough"],
            vec!["cough", "high_fever", "headache"],
            vec!["itching", "skin_rash", "nausea"],
            vec!["chills", "sweating", "high_fever", "headache"],
        ] {
            let result = aggregate(&symptoms(&set), &tree, &corpus).unwrap();
            assert!((0.0..=1.0).contains(&result.confidence), "{set:?}");
        }
    }

    #[test]
    fn no_walk_producing_a_disease_is_undiagnosable() {
        let corpus = sample_corpus();
        let tree = DecisionTree::from_nodes(vec![DecisionNode::Leaf { value: vec![0; 4] }])
            .unwrap();
        assert_eq!(
            aggregate(&symptoms(&["cough"]), &tree, &corpus),
            Err(AggregateError::Undiagnosable)
        );
        assert_eq!(
            aggregate(&[], &fixture_tree(&corpus), &corpus),
            Err(AggregateError::Undiagnosable)
        );
    }

    #[test]
    fn empty_ranking_has_no_primary() {
        let result = AggregatedResult {
            ranked: Vec::new(),
            confidence: 0.0,
            walks_performed: 0,
        };
        assert!(result.primary().is_none());
        assert!(result.secondary_diseases().is_empty());
    }
}
