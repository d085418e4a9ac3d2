mod concept_drift_stream;
pub mod generators;
mod stream;

pub use concept_drift_stream::ConceptDriftStream;
pub use stream::Stream;
