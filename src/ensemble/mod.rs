pub mod accuracy_window;
pub mod arte;
pub mod base_learner;
pub mod config;
pub mod executor;
pub mod resampling;

pub use accuracy_window::AccuracyWindow;
pub use arte::Arte;
pub use base_learner::ArteBaseLearner;
pub use config::{AccuracyUpdate, EnsembleConfig, VoteThreshold};
pub use executor::TrainingExecutor;
pub use resampling::{Resampler, Resampling};
