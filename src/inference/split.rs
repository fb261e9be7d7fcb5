use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::SplitConfig;

/// Case indices partitioned into a training part and a hold-out part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSplit {
    pub train: Vec<usize>,
    pub holdout: Vec<usize>,
}

/// Seeded shuffle-and-split of `n` cases. The hold-out size is
/// `ceil(n * test_fraction)`, capped so at least one case is trained on.
pub fn split_cases(n: usize, split: &SplitConfig) -> CaseSplit {
    let mut indices: Vec<usize> = (0..n).collect();
    if n == 0 {
        return CaseSplit {
            train: indices,
            holdout: Vec::new(),
        };
    }

    let fraction = split.test_fraction.clamp(0.0, 1.0);
    let holdout_len = ((n as f64 * fraction).ceil() as usize).min(n - 1);
    if holdout_len == 0 {
        return CaseSplit {
            train: indices,
            holdout: Vec::new(),
        };
    }

    let mut rng = StdRng::seed_from_u64(split.seed);
    indices.shuffle(&mut rng);
    let train = indices.split_off(holdout_len);
    CaseSplit {
        train,
        holdout: indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(test_fraction: f64, seed: u64) -> SplitConfig {
        SplitConfig {
            test_fraction,
            seed,
        }
    }

    #[test]
    fn sizes_follow_fraction() {
        let split = split_cases(100, &cfg(0.33, 42));
        assert_eq!(split.holdout.len(), 33);
        assert_eq!(split.train.len(), 67);
    }

    #[test]
    fn partitions_every_index_once() {
        let split = split_cases(20, &cfg(0.3, 20));
        let mut all: Vec<usize> = split.train.iter().chain(&split.holdout).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        assert_eq!(split_cases(50, &cfg(0.3, 7)), split_cases(50, &cfg(0.3, 7)));
    }

    #[test]
    fn zero_fraction_keeps_table_order() {
        let split = split_cases(5, &cfg(0.0, 42));
        assert_eq!(split.train, vec![0, 1, 2, 3, 4]);
        assert!(split.holdout.is_empty());
    }

    #[test]
    fn always_trains_on_at_least_one_case() {
        let split = split_cases(2, &cfg(0.99, 1));
        assert_eq!(split.train.len(), 1);
        assert_eq!(split.holdout.len(), 1);
        assert!(split_cases(1, &cfg(0.5, 1)).holdout.is_empty());
    }
}
