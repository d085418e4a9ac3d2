use crate::classifiers::hoeffding_tree::split_criteria::split_criterion::SplitCriterion;
use crate::utils::math::entropy;

const DEFAULT_MIN_BRANCH_FRACTION: f64 = 0.01;

/// Entropy reduction. Splits that leave fewer than two branches with at least
/// `min_branch_fraction` of the weight score `-inf`.
#[derive(Clone, Copy, Debug)]
pub struct InfoGainSplitCriterion {
    min_branch_fraction: f64,
}

impl InfoGainSplitCriterion {
    pub fn new() -> Self {
        Self::with_min_branch_fraction(DEFAULT_MIN_BRANCH_FRACTION)
    }

    pub fn with_min_branch_fraction(min_branch_fraction: f64) -> Self {
        Self {
            min_branch_fraction,
        }
    }

    fn post_split_entropy(post_split_dists: &[Vec<f64>]) -> f64 {
        let dist_weights: Vec<f64> = post_split_dists.iter().map(|d| d.iter().sum()).collect();
        let total_weight: f64 = dist_weights.iter().sum();
        if total_weight <= 0.0 {
            return 0.0;
        }
        post_split_dists
            .iter()
            .zip(&dist_weights)
            .map(|(dist, w)| w * entropy(dist))
            .sum::<f64>()
            / total_weight
    }

    fn num_subsets_greater_than_frac(&self, post_split_dists: &[Vec<f64>]) -> usize {
        let dist_weights: Vec<f64> = post_split_dists.iter().map(|d| d.iter().sum()).collect();
        let total_weight: f64 = dist_weights.iter().sum();
        dist_weights
            .iter()
            .filter(|&&w| total_weight > 0.0 && w / total_weight > self.min_branch_fraction)
            .count()
    }
}

impl Default for InfoGainSplitCriterion {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitCriterion for InfoGainSplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        if self.num_subsets_greater_than_frac(post_split_dists) < 2 {
            return f64::NEG_INFINITY;
        }
        entropy(pre_split_distribution) - Self::post_split_entropy(post_split_dists)
    }

    fn get_range_of_merit(&self, pre_split_distribution: &[f64]) -> f64 {
        let num_classes = pre_split_distribution.len().max(2);
        (num_classes as f64).log2()
    }
}
