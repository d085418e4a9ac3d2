use crate::classifiers::hoeffding_tree::instance_conditional_test::InstanceConditionalTest;
use crate::classifiers::hoeffding_tree::nodes::node::NodeId;
use crate::core::class_distribution::ClassDistribution;
use crate::core::instances::Instance;

pub struct SplitNode {
    observed_class_distribution: ClassDistribution,
    split_test: Box<dyn InstanceConditionalTest>,
    children: Vec<Option<NodeId>>,
}

impl SplitNode {
    pub fn new(
        split_test: Box<dyn InstanceConditionalTest>,
        observed_class_distribution: ClassDistribution,
        num_children: usize,
    ) -> Self {
        Self {
            observed_class_distribution,
            split_test,
            children: vec![None; num_children],
        }
    }

    pub fn observed_class_distribution(&self) -> &ClassDistribution {
        &self.observed_class_distribution
    }

    pub fn split_test(&self) -> &dyn InstanceConditionalTest {
        self.split_test.as_ref()
    }

    pub fn set_child(&mut self, index: usize, child: NodeId) {
        if index >= self.children.len() {
            self.children.resize(index + 1, None);
        }
        self.children[index] = Some(child);
    }

    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied().flatten()
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }

    pub fn instance_child_index(&self, instance: &dyn Instance) -> Option<usize> {
        self.split_test.branch_for_instance(instance)
    }
}
