pub mod classifiers;
pub mod core;
pub mod drift;
pub mod ensemble;
pub mod error;
pub mod evaluation;
pub mod streams;
pub mod tasks;
pub mod ui;
pub mod utils;

pub use ensemble::{Arte, EnsembleConfig};
pub use error::{ArteError, Result};

#[cfg(test)]
mod testing;
