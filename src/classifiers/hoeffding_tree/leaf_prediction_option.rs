use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How a leaf turns its statistics into class votes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LeafPredictionOption {
    MajorityClass,
    /// Naive Bayes once the leaf has seen `nb_threshold` weight.
    NaiveBayes,
    /// Whichever of majority class and Naive Bayes has been right more often at this leaf.
    #[default]
    #[serde(alias = "nba")]
    #[strum(to_string = "adaptive-naive-bayes", serialize = "nba")]
    AdaptiveNaiveBayes,
}
