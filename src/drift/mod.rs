mod adwin;
mod change_detector;

pub use adwin::Adwin;
pub use change_detector::ChangeDetector;

use crate::error::{ArteError, Result};
use serde::{Deserialize, Serialize};

/// Drift detector template used by every ensemble member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "method")]
pub enum DriftDetectorChoice {
    Adwin {
        #[serde(default = "default_adwin_delta")]
        delta: f64,
    },
}

fn default_adwin_delta() -> f64 {
    0.001
}

impl Default for DriftDetectorChoice {
    fn default() -> Self {
        DriftDetectorChoice::Adwin {
            delta: default_adwin_delta(),
        }
    }
}

impl DriftDetectorChoice {
    pub fn validate(&self) -> Result<()> {
        match *self {
            DriftDetectorChoice::Adwin { delta } if !(delta > 0.0 && delta < 1.0) => Err(
                ArteError::invalid("drift_detector.delta", format!("must lie in (0, 1), got {delta}")),
            ),
            _ => Ok(()),
        }
    }

    pub fn build(&self) -> Box<dyn ChangeDetector> {
        match *self {
            DriftDetectorChoice::Adwin { delta } => Box::new(Adwin::new(delta)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_adwin_with_small_delta() {
        let parsed: DriftDetectorChoice = serde_json::from_str(r#"{"method": "adwin"}"#).unwrap();
        assert_eq!(parsed, DriftDetectorChoice::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn rejects_delta_outside_unit_interval() {
        let bad = DriftDetectorChoice::Adwin { delta: 0.0 };
        assert!(bad.validate().is_err());
    }
}
