mod gini_split_criterion;
mod info_gain_split_criterion;
mod split_criterion;

pub use gini_split_criterion::GiniSplitCriterion;
pub use info_gain_split_criterion::InfoGainSplitCriterion;
pub use split_criterion::SplitCriterion;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SplitCriterionChoice {
    #[default]
    InfoGain,
    Gini,
}

impl SplitCriterionChoice {
    pub fn build(self) -> Box<dyn SplitCriterion> {
        match self {
            SplitCriterionChoice::InfoGain => Box::new(InfoGainSplitCriterion::new()),
            SplitCriterionChoice::Gini => Box::new(GiniSplitCriterion::new()),
        }
    }
}
