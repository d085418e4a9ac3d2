use crate::classifiers::hoeffding_tree::HoeffdingTreeConfig;
use crate::drift::DriftDetectorChoice;
use crate::ensemble::resampling::Resampling;
use crate::error::{ArteError, Result};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// When members' accuracy windows and the voting threshold are refreshed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AccuracyUpdate {
    /// While predicting a labelled instance (`test_on_instance`).
    #[default]
    OnPrediction,
    /// At the start of each training step, from the votes before training.
    OnTraining,
}

/// Threshold a member's windowed accuracy must reach to take part in the vote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VoteThreshold {
    #[default]
    Mean,
    MeanMinusStdDev,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnsembleConfig {
    #[serde(default = "default_ensemble_size")]
    pub ensemble_size: usize,

    #[serde(default)]
    pub resampling: Resampling,

    /// Outcomes kept per member for vote gating.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    #[serde(default)]
    pub drift_detector: DriftDetectorChoice,

    #[serde(default)]
    pub disable_drift_detection: bool,

    /// `-1` uses every hardware thread, `0` and `1` train sequentially.
    #[serde(default = "default_jobs")]
    pub jobs: i32,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Lower bound of the per-member feature subspace size; the upper bound is the
    /// number of features.
    #[serde(default = "default_min_subspace_size")]
    pub min_subspace_size: usize,

    #[serde(default)]
    pub accuracy_update: AccuracyUpdate,

    #[serde(default)]
    pub vote_threshold: VoteThreshold,

    /// Train only on misclassified instances and on every fifth correct one per class.
    #[serde(default)]
    pub regularized_training: bool,

    #[serde(default)]
    pub tree: HoeffdingTreeConfig,
}

fn default_ensemble_size() -> usize {
    100
}

fn default_window_size() -> usize {
    400
}

fn default_jobs() -> i32 {
    1
}

fn default_seed() -> u64 {
    1
}

fn default_min_subspace_size() -> usize {
    2
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            ensemble_size: default_ensemble_size(),
            resampling: Resampling::default(),
            window_size: default_window_size(),
            drift_detector: DriftDetectorChoice::default(),
            disable_drift_detection: false,
            jobs: default_jobs(),
            seed: default_seed(),
            min_subspace_size: default_min_subspace_size(),
            accuracy_update: AccuracyUpdate::default(),
            vote_threshold: VoteThreshold::default(),
            regularized_training: false,
            tree: HoeffdingTreeConfig::default(),
        }
    }
}

impl EnsembleConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ensemble_size == 0 {
            return Err(ArteError::invalid("ensemble_size", "must be at least 1"));
        }
        if self.window_size == 0 {
            return Err(ArteError::invalid("window_size", "must be at least 1"));
        }
        if self.jobs < -1 {
            return Err(ArteError::invalid(
                "jobs",
                format!("must be -1, 0 or a positive thread count, got {}", self.jobs),
            ));
        }
        if self.min_subspace_size == 0 {
            return Err(ArteError::invalid("min_subspace_size", "must be at least 1"));
        }
        self.resampling.build()?;
        self.drift_detector.validate()?;
        self.tree.validate()
    }
}
