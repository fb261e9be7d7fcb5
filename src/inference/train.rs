//! CART training over binary symptom features.
//!
//! Gini impurity, one split per 0/1 feature at [`BINARY_THRESHOLD`]. Among
//! equally good splits the lowest feature index wins, so training is
//! deterministic and does not depend on case order.

use crate::corpus::EncodedCase;

use super::tree::{DecisionNode, DecisionTree, BINARY_THRESHOLD};

/// Improvements smaller than this are treated as ties.
const IMPURITY_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, Default)]
pub struct TrainParams {
    pub max_depth: Option<usize>,
}

/// Grow a tree on `cases[rows]`. Returns `None` when `rows` is empty.
pub fn train_tree(
    cases: &[EncodedCase],
    rows: &[usize],
    n_features: usize,
    n_diseases: usize,
    params: TrainParams,
) -> Option<DecisionTree> {
    if rows.is_empty() {
        return None;
    }
    let mut builder = Builder {
        cases,
        n_features,
        n_diseases,
        params,
        nodes: Vec::new(),
    };
    builder.grow(rows.to_vec(), 0);
    DecisionTree::from_nodes(builder.nodes)
}

struct Builder<'a> {
    cases: &'a [EncodedCase],
    n_features: usize,
    n_diseases: usize,
    params: TrainParams,
    nodes: Vec<DecisionNode>,
}

impl Builder<'_> {
    /// Push the subtree for `rows` and return its root index.
    fn grow(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        let counts = self.class_counts(&rows);
        let at_max_depth = self.params.max_depth.is_some_and(|max| depth >= max);

        let best = if is_pure(&counts) || at_max_depth {
            None
        } else {
            self.best_split(&rows)
        };

        let Some(feature) = best else {
            self.nodes.push(DecisionNode::Leaf { value: counts });
            return self.nodes.len() - 1;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&r| {
                !self.cases[r].features.get(feature).copied().unwrap_or(false)
            });

        let idx = self.nodes.len();
        // Placeholder; children are patched in once their indices are known.
        self.nodes.push(DecisionNode::Leaf { value: Vec::new() });
        let left = self.grow(left_rows, depth + 1);
        let right = self.grow(right_rows, depth + 1);
        self.nodes[idx] = DecisionNode::Internal {
            feature,
            threshold: BINARY_THRESHOLD,
            left,
            right,
        };
        idx
    }

    fn class_counts(&self, rows: &[usize]) -> Vec<u32> {
        let mut counts = vec![0u32; self.n_diseases];
        for &r in rows {
            if let Some(slot) = counts.get_mut(self.cases[r].disease) {
                *slot += 1;
            }
        }
        counts
    }

    /// Feature with the lowest weighted child impurity among splits that
    /// leave both sides non-empty.
    fn best_split(&self, rows: &[usize]) -> Option<usize> {
        let total = rows.len() as f64;
        let mut best: Option<(usize, f64)> = None;

        for feature in 0..self.n_features {
            let mut left = vec![0u32; self.n_diseases];
            let mut right = vec![0u32; self.n_diseases];
            for &r in rows {
                let case = &self.cases[r];
                let side = if case.features.get(feature).copied().unwrap_or(false) {
                    &mut right
                } else {
                    &mut left
                };
                if let Some(slot) = side.get_mut(case.disease) {
                    *slot += 1;
                }
            }

            let n_left: u32 = left.iter().sum();
            let n_right: u32 = right.iter().sum();
            if n_left == 0 || n_right == 0 {
                continue;
            }

            let impurity = (f64::from(n_left) * gini(&left) + f64::from(n_right) * gini(&right))
                / total;
            match best {
                Some((_, best_impurity)) if impurity >= best_impurity - IMPURITY_EPSILON => {}
                _ => best = Some((feature, impurity)),
            }
        }

        best.map(|(feature, _)| feature)
    }
}

fn is_pure(counts: &[u32]) -> bool {
    counts.iter().filter(|&&c| c > 0).count() <= 1
}

pub fn gini(counts: &[u32]) -> f64 {
    let n: u32 = counts.iter().sum();
    if n == 0 {
        return 0.0;
    }
    let n = f64::from(n);
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = f64::from(c) / n;
            p * p
        })
        .sum::<f64>()
}

/// Fraction of `rows` whose prediction matches the label.
pub fn accuracy(tree: &DecisionTree, cases: &[EncodedCase], rows: &[usize]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let correct = rows
        .iter()
        .filter(|&&r| tree.predict(&cases[r].features) == Some(cases[r].disease))
        .count();
    Some(correct as f64 / rows.len() as f64)
}
