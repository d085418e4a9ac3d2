use crate::classifiers::attribute_class_observers::NumericSplitPoints;
use crate::classifiers::hoeffding_tree::leaf_prediction_option::LeafPredictionOption;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterionChoice;
use crate::error::{ArteError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoeffdingTreeConfig {
    /// Weight a leaf must accumulate between split attempts.
    #[serde(default = "default_grace_period")]
    pub grace_period: usize,

    /// Allowed error `δ` of a split decision.
    #[serde(default = "default_split_confidence")]
    pub split_confidence: f64,

    #[serde(default = "default_tie_threshold")]
    pub tie_threshold: f64,

    #[serde(default)]
    pub binary_splits: bool,

    #[serde(default)]
    pub no_pre_prune: bool,

    #[serde(default)]
    pub split_criterion: SplitCriterionChoice,

    #[serde(default)]
    pub leaf_prediction: LeafPredictionOption,

    #[serde(default)]
    pub nb_threshold: usize,

    /// Features tracked per leaf; `0` tracks all of them.
    #[serde(default)]
    pub subspace_size: usize,

    #[serde(default)]
    pub numeric_split_points: NumericSplitPoints,
}

fn default_grace_period() -> usize {
    100
}

fn default_split_confidence() -> f64 {
    0.01
}

fn default_tie_threshold() -> f64 {
    0.05
}

impl Default for HoeffdingTreeConfig {
    fn default() -> Self {
        Self {
            grace_period: default_grace_period(),
            split_confidence: default_split_confidence(),
            tie_threshold: default_tie_threshold(),
            binary_splits: false,
            no_pre_prune: false,
            split_criterion: SplitCriterionChoice::default(),
            leaf_prediction: LeafPredictionOption::default(),
            nb_threshold: 0,
            subspace_size: 0,
            numeric_split_points: NumericSplitPoints::default(),
        }
    }
}

impl HoeffdingTreeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grace_period == 0 {
            return Err(ArteError::invalid("grace_period", "must be at least 1"));
        }
        if !(self.split_confidence > 0.0 && self.split_confidence < 1.0) {
            return Err(ArteError::invalid(
                "split_confidence",
                format!("must lie in (0, 1), got {}", self.split_confidence),
            ));
        }
        if !(self.tie_threshold >= 0.0) {
            return Err(ArteError::invalid(
                "tie_threshold",
                format!("must be non-negative, got {}", self.tie_threshold),
            ));
        }
        if let NumericSplitPoints::EvenlySpaced { bins: 0 } = self.numeric_split_points {
            return Err(ArteError::invalid("numeric_split_points.bins", "must be at least 1"));
        }
        Ok(())
    }
}
