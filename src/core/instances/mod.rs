mod dense_instance;
mod instance;

pub use dense_instance::DenseInstance;
pub use instance::{Instance, model_attribute_index_to_instance_index};
