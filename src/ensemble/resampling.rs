use crate::error::{ArteError, Result};
use rand::rngs::StdRng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};

/// How many copies of each instance a member sees during online bagging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "method")]
pub enum Resampling {
    /// `k ~ Poisson(λ)`; `λ = 1` is Oza's online bagging, larger values leverage bagging.
    Poisson {
        #[serde(default = "default_lambda")]
        lambda: f64,
    },
    Constant {
        #[serde(default = "default_constant_weight")]
        weight: f64,
    },
}

fn default_lambda() -> f64 {
    6.0
}

fn default_constant_weight() -> f64 {
    1.0
}

impl Default for Resampling {
    fn default() -> Self {
        Resampling::Poisson {
            lambda: default_lambda(),
        }
    }
}

impl Resampling {
    pub fn build(&self) -> Result<Resampler> {
        match *self {
            Resampling::Poisson { lambda } => {
                if !(lambda > 0.0 && lambda.is_finite()) {
                    return Err(ArteError::invalid(
                        "resampling.lambda",
                        format!("must be positive and finite, got {lambda}"),
                    ));
                }
                Poisson::new(lambda)
                    .map(Resampler::Poisson)
                    .map_err(|e| ArteError::invalid("resampling.lambda", e.to_string()))
            }
            Resampling::Constant { weight } => {
                if !(weight >= 0.0 && weight.is_finite()) {
                    return Err(ArteError::invalid(
                        "resampling.weight",
                        format!("must be non-negative and finite, got {weight}"),
                    ));
                }
                Ok(Resampler::Constant(weight))
            }
        }
    }
}

/// Validated sampler for [`Resampling`].
#[derive(Clone, Debug)]
pub enum Resampler {
    Poisson(Poisson<f64>),
    Constant(f64),
}

impl Resampler {
    pub fn draw(&self, rng: &mut StdRng) -> f64 {
        match self {
            Resampler::Poisson(poisson) => poisson.sample(rng),
            Resampler::Constant(weight) => *weight,
        }
    }
}
