use crate::classifiers::attribute_class_observers::attribute_class_observer::AttributeClassObserver;
use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::instance_conditional_test::NumericAttributeBinaryTest;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::core::estimators::GaussianEstimator;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// How candidate thresholds are generated for numeric features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum NumericSplitPoints {
    /// One uniform draw in the observed range per split attempt.
    #[default]
    Randomized,
    EvenlySpaced {
        #[serde(default = "default_bins")]
        bins: usize,
    },
}

fn default_bins() -> usize {
    10
}

pub struct GaussianNumericAttributeClassObserver {
    min_value_observed_per_class: Vec<f64>,
    max_value_observed_per_class: Vec<f64>,
    attribute_value_distribution_per_class: Vec<Option<GaussianEstimator>>,
    split_points: NumericSplitPoints,
}

impl GaussianNumericAttributeClassObserver {
    pub fn new(split_points: NumericSplitPoints) -> Self {
        GaussianNumericAttributeClassObserver {
            min_value_observed_per_class: Vec::new(),
            max_value_observed_per_class: Vec::new(),
            attribute_value_distribution_per_class: Vec::new(),
            split_points,
        }
    }

    #[inline]
    fn ensure_class(&mut self, class_val: usize) {
        if class_val >= self.attribute_value_distribution_per_class.len() {
            let new_len = class_val + 1;
            self.attribute_value_distribution_per_class
                .resize_with(new_len, || None);
            self.min_value_observed_per_class.resize(new_len, f64::INFINITY);
            self.max_value_observed_per_class
                .resize(new_len, f64::NEG_INFINITY);
        }
    }

    /// Smallest and largest value seen over all classes, `None` before any observation.
    pub fn observed_range(&self) -> Option<(f64, f64)> {
        let mut min_val = f64::INFINITY;
        let mut max_val = f64::NEG_INFINITY;

        for (i, est) in self.attribute_value_distribution_per_class.iter().enumerate() {
            if est.is_some() {
                min_val = min_val.min(self.min_value_observed_per_class[i]);
                max_val = max_val.max(self.max_value_observed_per_class[i]);
            }
        }

        (min_val.is_finite() && max_val.is_finite()).then_some((min_val, max_val))
    }

    fn get_split_point_suggestions(&self, rng: &mut StdRng) -> Vec<f64> {
        let Some((min_val, max_val)) = self.observed_range() else {
            return Vec::new();
        };
        let range = max_val - min_val;

        let candidates: Vec<f64> = match self.split_points {
            NumericSplitPoints::Randomized => {
                vec![min_val + rng.random::<f64>() * range]
            }
            NumericSplitPoints::EvenlySpaced { bins } => (0..bins)
                .map(|i| (range / (bins as f64 + 1.0)) * (i as f64 + 1.0) + min_val)
                .collect(),
        };

        candidates
            .into_iter()
            .filter(|&v| v > min_val && v < max_val)
            .collect()
    }

    /// `[left, right]` class distributions for `feature <= split_value`.
    pub fn get_class_dists_resulting_from_binary_split(&self, split_value: f64) -> Vec<Vec<f64>> {
        let num_classes = self.attribute_value_distribution_per_class.len();
        let mut lhs = vec![0.0; num_classes];
        let mut rhs = vec![0.0; num_classes];

        for (class_idx, est) in self.attribute_value_distribution_per_class.iter().enumerate() {
            let Some(est) = est else { continue };
            if split_value < self.min_value_observed_per_class[class_idx] {
                rhs[class_idx] += est.total_weight_observed();
            } else if split_value >= self.max_value_observed_per_class[class_idx] {
                lhs[class_idx] += est.total_weight_observed();
            } else {
                let [less, equal, greater] =
                    est.estimated_weight_less_equal_greater_value(split_value);
                lhs[class_idx] += less + equal;
                rhs[class_idx] += greater;
            }
        }
        vec![lhs, rhs]
    }
}

impl AttributeClassObserver for GaussianNumericAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize, weight: f64) {
        if !att_val.is_finite() || !weight.is_finite() || weight <= 0.0 {
            return;
        }

        self.ensure_class(class_val);

        let min = &mut self.min_value_observed_per_class[class_val];
        *min = min.min(att_val);
        let max = &mut self.max_value_observed_per_class[class_val];
        *max = max.max(att_val);

        self.attribute_value_distribution_per_class[class_val]
            .get_or_insert_with(GaussianEstimator::new)
            .add_observation(att_val, weight);
    }

    fn probability_of_attribute_value_given_class(
        &self,
        att_val: f64,
        class_val: usize,
    ) -> Option<f64> {
        if att_val.is_nan() {
            return None;
        }
        match self.attribute_value_distribution_per_class.get(class_val) {
            Some(Some(est)) if est.total_weight_observed() > 0.0 => {
                Some(est.probability_density(att_val))
            }
            _ => None,
        }
    }

    fn get_best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_dist: &[f64],
        att_index: usize,
        _binary_only: bool,
        rng: &mut StdRng,
    ) -> Option<AttributeSplitSuggestion> {
        let mut best: Option<AttributeSplitSuggestion> = None;

        for split_value in self.get_split_point_suggestions(rng) {
            let post_dists = self.get_class_dists_resulting_from_binary_split(split_value);
            let merit = criterion.get_merit_of_split(pre_split_dist, &post_dists);

            if best.as_ref().is_none_or(|b| merit > b.get_merit()) {
                best = Some(AttributeSplitSuggestion::new(
                    Some(Box::new(NumericAttributeBinaryTest::new(
                        att_index,
                        split_value,
                        true,
                    ))),
                    post_dists,
                    merit,
                ));
            }
        }
        best
    }
}
