use crate::error::Result;
use crate::streams::generators::SeaGenerator;
use crate::streams::{ConceptDriftStream, Stream};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_sea_function() -> u8 {
    2
}

fn default_drift_function() -> u8 {
    3
}

fn default_drift_position() -> u64 {
    5_000
}

fn default_drift_width() -> u64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeaParameters {
    /// SEA function (1-4).
    #[serde(default = "default_sea_function")]
    pub function_id: u8,

    #[serde(default)]
    pub balance: bool,

    /// Probability of flipping a label (0.0-1.0).
    #[serde(default)]
    pub noise_pct: f64,

    #[serde(default)]
    pub max_instances: Option<u64>,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SeaParameters {
    fn default() -> Self {
        Self {
            function_id: default_sea_function(),
            balance: false,
            noise_pct: 0.0,
            max_instances: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl SeaParameters {
    fn build(&self) -> Result<SeaGenerator> {
        SeaGenerator::new(
            self.function_id,
            self.balance,
            self.noise_pct,
            self.max_instances,
            self.seed,
        )
    }
}

/// SEA stream that switches to a second SEA function around `position`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeaDriftParameters {
    #[serde(default)]
    pub initial: SeaParameters,

    #[serde(default = "default_drifted_sea")]
    pub drifted: SeaParameters,

    #[serde(default = "default_drift_position")]
    pub position: u64,

    /// Width of the sigmoid transition; 1 is abrupt.
    #[serde(default = "default_drift_width")]
    pub width: u64,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_drifted_sea() -> SeaParameters {
    SeaParameters {
        function_id: default_drift_function(),
        seed: DEFAULT_SEED + 1,
        ..SeaParameters::default()
    }
}

impl Default for SeaDriftParameters {
    fn default() -> Self {
        Self {
            initial: SeaParameters::default(),
            drifted: default_drifted_sea(),
            position: default_drift_position(),
            width: default_drift_width(),
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(StreamKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum StreamChoice {
    #[strum_discriminants(strum(
        message = "SEA Generator",
        detailed_message = "Generates SEA concept functions."
    ))]
    SeaGenerator(SeaParameters),

    #[strum_discriminants(strum(
        message = "SEA Generator with concept drift",
        detailed_message = "Switches between two SEA functions with a sigmoid transition."
    ))]
    SeaDrift(SeaDriftParameters),
}

impl StreamChoice {
    pub fn default_params(kind: StreamKind) -> Result<Value> {
        Ok(match kind {
            StreamKind::SeaGenerator => serde_json::to_value(SeaParameters::default())?,
            StreamKind::SeaDrift => serde_json::to_value(SeaDriftParameters::default())?,
        })
    }

    pub fn from_parts(kind: StreamKind, params: Value) -> Result<Self> {
        let kind: &'static str = kind.into();
        Ok(serde_json::from_value(
            json!({ "type": kind, "params": params }),
        )?)
    }

    pub fn build(&self) -> Result<Box<dyn Stream>> {
        match self {
            StreamChoice::SeaGenerator(p) => Ok(Box::new(p.build()?)),
            StreamChoice::SeaDrift(p) => Ok(Box::new(ConceptDriftStream::new(
                Box::new(p.initial.build()?),
                Box::new(p.drifted.build()?),
                p.position,
                p.width,
                p.seed,
            )?)),
        }
    }
}
