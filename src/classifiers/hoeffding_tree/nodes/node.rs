use crate::classifiers::hoeffding_tree::nodes::learning_nodes::{
    ActiveLearningNode, InactiveLearningNode,
};
use crate::classifiers::hoeffding_tree::nodes::split_node::SplitNode;
use crate::core::class_distribution::ClassDistribution;

/// Index of a node in the tree arena.
pub type NodeId = usize;

pub enum Node {
    Split(SplitNode),
    ActiveLeaf(ActiveLearningNode),
    InactiveLeaf(InactiveLearningNode),
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::Split(_))
    }

    pub fn observed_class_distribution(&self) -> &ClassDistribution {
        match self {
            Node::Split(n) => n.observed_class_distribution(),
            Node::ActiveLeaf(n) => n.observed_class_distribution(),
            Node::InactiveLeaf(n) => n.observed_class_distribution(),
        }
    }
}

/// Where routing an instance ended. `node == None` means the path ended on the empty
/// child slot `parent_branch` of `parent`; `parent == None` means the node is the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoundNode {
    pub node: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub parent_branch: Option<usize>,
}

impl FoundNode {
    pub fn new(node: Option<NodeId>, parent: Option<NodeId>, parent_branch: Option<usize>) -> Self {
        Self {
            node,
            parent,
            parent_branch,
        }
    }
}
