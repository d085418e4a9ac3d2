pub mod learning_nodes;
mod node;
mod split_node;

pub use learning_nodes::{ActiveLearningNode, InactiveLearningNode};
pub use node::{FoundNode, Node, NodeId};
pub use split_node::SplitNode;
