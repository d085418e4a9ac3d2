mod active_learning_node;
mod inactive_learning_node;

pub use active_learning_node::ActiveLearningNode;
pub use inactive_learning_node::InactiveLearningNode;
