//! Binary decision tree over the symptom feature space.
//!
//! Nodes live in a flat arena owned by the tree; children are referenced by
//! index. The tree is built once and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::corpus::{ReferenceCorpus, Symptom};

use super::types::TreeWalk;

/// Threshold used for every split on a 0/1 feature.
pub const BINARY_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecisionNode {
    Internal {
        /// Symptom index in the corpus universe.
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Training-case count per disease index.
        value: Vec<u32>,
    },
}

impl DecisionNode {
    /// Disease indices with a non-zero count, ascending.
    pub fn leaf_diseases(&self) -> Vec<usize> {
        match self {
            Self::Leaf { value } => value
                .iter()
                .enumerate()
                .filter(|&(_, &count)| count > 0)
                .map(|(idx, _)| idx)
                .collect(),
            Self::Internal { .. } => Vec::new(),
        }
    }

    /// Majority disease (lowest index on equal counts).
    pub fn majority_disease(&self) -> Option<usize> {
        match self {
            Self::Leaf { value } => value
                .iter()
                .enumerate()
                .filter(|&(_, &count)| count > 0)
                .fold(None, |best: Option<(usize, u32)>, (idx, &count)| match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((idx, count)),
                })
                .map(|(idx, _)| idx),
            Self::Internal { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<DecisionNode>,
}

impl DecisionTree {
    /// Root is `nodes[0]`, laid out in preorder: every child index points
    /// past its parent and inside the arena, so accepted trees are acyclic.
    pub fn from_nodes(nodes: Vec<DecisionNode>) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }
        let len = nodes.len();
        let valid = nodes.iter().enumerate().all(|(idx, n)| match n {
            DecisionNode::Internal { left, right, .. } => {
                (idx + 1..len).contains(left) && (idx + 1..len).contains(right)
            }
            DecisionNode::Leaf { .. } => true,
        });
        valid.then_some(Self { nodes })
    }

    pub fn nodes(&self) -> &[DecisionNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, DecisionNode::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn depth_from(nodes: &[DecisionNode], idx: usize) -> usize {
            match &nodes[idx] {
                DecisionNode::Leaf { .. } => 0,
                DecisionNode::Internal { left, right, .. } => {
                    1 + depth_from(nodes, *left).max(depth_from(nodes, *right))
                }
            }
        }
        depth_from(&self.nodes, 0)
    }

    /// Distinct feature indices used by internal nodes, ascending.
    pub fn features(&self) -> Vec<usize> {
        let mut features: Vec<usize> = self
            .nodes
            .iter()
            .filter_map(|n| match n {
                DecisionNode::Internal { feature, .. } => Some(*feature),
                DecisionNode::Leaf { .. } => None,
            })
            .collect();
        features.sort_unstable();
        features.dedup();
        features
    }

    /// Walk the path a case with only `asserted` present would take.
    ///
    /// Every internal node whose feature equals `asserted` sends the walk
    /// right and records the feature in the trail; all others send it left.
    /// The leaf is decoded to the first disease it carries, and that
    /// disease's corpus row is attached for confidence scoring. Returns
    /// `None` when the leaf carries no disease the corpus knows.
    pub fn walk(&self, corpus: &ReferenceCorpus, asserted: &Symptom) -> Option<TreeWalk> {
        let mut trail = Vec::new();
        let mut idx = 0;

        loop {
            match &self.nodes[idx] {
                DecisionNode::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let name = corpus.symptom(*feature)?;
                    let value = if name == asserted { 1.0 } else { 0.0 };
                    if value <= *threshold {
                        idx = *left;
                    } else {
                        trail.push(name.clone());
                        idx = *right;
                    }
                }
                leaf @ DecisionNode::Leaf { .. } => {
                    let disease_idx = *leaf.leaf_diseases().first()?;
                    let disease = corpus.disease(disease_idx)?.clone();
                    return Some(TreeWalk {
                        asserted: asserted.clone(),
                        disease,
                        disease_index: disease_idx,
                        trail,
                        corpus_row: corpus.row_symptoms(disease_idx),
                    });
                }
            }
        }
    }

    /// Standard prediction over a dense feature vector; returns the leaf's
    /// majority disease index.
    pub fn predict(&self, features: &[bool]) -> Option<usize> {
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match &self.nodes[idx] {
                DecisionNode::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = if features.get(*feature).copied().unwrap_or(false) {
                        1.0
                    } else {
                        0.0
                    };
                    idx = if value <= *threshold { *left } else { *right };
                }
                leaf @ DecisionNode::Leaf { .. } => return leaf.majority_disease(),
            }
        }
        None
    }
}
