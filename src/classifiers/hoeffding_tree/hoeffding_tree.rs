use crate::classifiers::Classifier;
use crate::classifiers::conditional_tests::attribute_split_suggestion::{
    AttributeSplitSuggestion, sort_by_merit,
};
use crate::classifiers::hoeffding_tree::hoeffding_tree_config::HoeffdingTreeConfig;
use crate::classifiers::hoeffding_tree::instance_conditional_test::InstanceConditionalTest;
use crate::classifiers::hoeffding_tree::nodes::{
    ActiveLearningNode, FoundNode, InactiveLearningNode, Node, NodeId, SplitNode,
};
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::core::class_distribution::{ClassDistribution, max_index};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::trace;

/// `ε = sqrt(R² ln(1/δ) / 2n)`.
pub fn compute_hoeffding_bound(range: f64, confidence: f64, n: f64) -> f64 {
    ((range * range * (1.0 / confidence).ln()) / (2.0 * n)).sqrt()
}

/// The best candidate wins when it leads the runner-up by more than the Hoeffding
/// bound, or when the bound fell below the tie threshold.
fn split_is_justified(merit_gap: f64, range: f64, config: &HoeffdingTreeConfig, n: f64) -> bool {
    let hoeffding_bound = compute_hoeffding_bound(range, config.split_confidence, n);
    merit_gap > hoeffding_bound || hoeffding_bound < config.tie_threshold
}

/// Incrementally grown decision tree. Nodes live in an arena and refer to their
/// children by index; vacated slots are reused.
pub struct HoeffdingTree {
    config: HoeffdingTreeConfig,
    split_criterion: Box<dyn SplitCriterion>,
    nodes: Vec<Option<Node>>,
    free_slots: Vec<NodeId>,
    tree_root: Option<NodeId>,
    decision_node_count: usize,
    active_leaf_node_count: usize,
    inactive_leaf_node_count: usize,
    training_weight_seen_by_model: f64,
    growth_allowed: bool,
    rng: StdRng,
}

impl HoeffdingTree {
    pub fn new(config: HoeffdingTreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_validated_config(config))
    }

    pub(crate) fn with_validated_config(config: HoeffdingTreeConfig) -> Self {
        Self {
            split_criterion: config.split_criterion.build(),
            config,
            nodes: Vec::new(),
            free_slots: Vec::new(),
            tree_root: None,
            decision_node_count: 0,
            active_leaf_node_count: 0,
            inactive_leaf_node_count: 0,
            training_weight_seen_by_model: 0.0,
            growth_allowed: true,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Seed of the generator used by [`Classifier::train_on_instance`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &HoeffdingTreeConfig {
        &self.config
    }

    pub fn set_growth_allowed(&mut self, allowed: bool) {
        self.growth_allowed = allowed;
    }

    pub fn is_trained(&self) -> bool {
        self.tree_root.is_some()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree_root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).and_then(Option::as_mut)
    }

    pub fn decision_node_count(&self) -> usize {
        self.decision_node_count
    }

    pub fn active_leaf_node_count(&self) -> usize {
        self.active_leaf_node_count
    }

    pub fn inactive_leaf_node_count(&self) -> usize {
        self.inactive_leaf_node_count
    }

    pub fn training_weight_seen(&self) -> f64 {
        self.training_weight_seen_by_model
    }

    /// Number of decision nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let Some(root) = self.tree_root else {
            return 0;
        };
        let mut deepest = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Some(Node::Split(split)) => {
                    stack.extend(split.children().map(|child| (child, depth + 1)));
                    deepest = deepest.max(depth + 1);
                }
                _ => deepest = deepest.max(depth),
            }
        }
        deepest
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free_slots.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Puts `replacement` where `found.node` hangs (its parent's slot or the root)
    /// and frees the old slot.
    fn replace_node(&mut self, found: &FoundNode, replacement: NodeId) {
        match (found.parent, found.parent_branch) {
            (Some(parent), Some(branch)) => {
                if let Some(Node::Split(split)) = self.node_mut(parent) {
                    split.set_child(branch, replacement);
                }
            }
            _ => self.tree_root = Some(replacement),
        }
        if let Some(old) = found.node {
            self.nodes[old] = None;
            self.free_slots.push(old);
        }
    }

    fn new_learning_node(observed: ClassDistribution) -> Node {
        Node::ActiveLeaf(ActiveLearningNode::new(observed))
    }

    /// Follows split tests from the root. Stops early at a decision node when the
    /// tested value is missing, or at an empty child slot.
    pub fn filter_instance_to_leaf(&self, instance: &dyn Instance) -> FoundNode {
        let Some(mut current) = self.tree_root else {
            return FoundNode::default();
        };
        let mut parent = None;
        let mut parent_branch = None;

        loop {
            let Some(Node::Split(split)) = self.node(current) else {
                return FoundNode::new(Some(current), parent, parent_branch);
            };
            let Some(branch) = split.instance_child_index(instance) else {
                return FoundNode::new(Some(current), parent, parent_branch);
            };
            match split.child(branch) {
                Some(child) => {
                    parent = Some(current);
                    parent_branch = Some(branch);
                    current = child;
                }
                None => return FoundNode::new(None, Some(current), Some(branch)),
            }
        }
    }

    pub fn votes(&self, instance: &dyn Instance) -> Vec<f64> {
        let num_classes = instance.number_of_classes();
        let found = self.filter_instance_to_leaf(instance);

        let mut votes = match found.node.or(found.parent).and_then(|id| self.node(id)) {
            Some(Node::ActiveLeaf(leaf)) => leaf.get_class_votes(instance, &self.config),
            Some(Node::InactiveLeaf(leaf)) => leaf.get_class_votes(),
            Some(Node::Split(split)) => split.observed_class_distribution().to_vec(),
            None => Vec::new(),
        };
        if votes.len() < num_classes {
            votes.resize(num_classes, 0.0);
        }
        votes
    }

    pub fn correctly_classifies(&self, instance: &dyn Instance) -> bool {
        match instance.class_value() {
            Some(class) => max_index(&self.votes(instance)) == Some(class as usize),
            None => false,
        }
    }

    /// Trains on `instance` as if it carried `weight`. `rng` drives feature-subset
    /// draws, randomized split points and multiway branch sampling.
    pub fn train_weighted(&mut self, instance: &dyn Instance, weight: f64, rng: &mut StdRng) {
        let Some(class_value) = instance.class_value() else {
            return;
        };
        if !(weight > 0.0 && weight.is_finite()) {
            return;
        }
        let class_index = class_value as usize;

        if self.tree_root.is_none() {
            let root = self.alloc(Self::new_learning_node(ClassDistribution::new()));
            self.tree_root = Some(root);
            self.active_leaf_node_count = 1;
        }

        let mut found = self.filter_instance_to_leaf(instance);
        let leaf_id = match found.node {
            Some(id) => id,
            None => {
                let id = self.alloc(Self::new_learning_node(ClassDistribution::new()));
                if let (Some(parent), Some(branch)) = (found.parent, found.parent_branch) {
                    if let Some(Node::Split(split)) = self.node_mut(parent) {
                        split.set_child(branch, id);
                    }
                }
                self.active_leaf_node_count += 1;
                found.node = Some(id);
                id
            }
        };

        let config = &self.config;
        let mut split_attempt_at = None;
        match self.nodes.get_mut(leaf_id) {
            Some(Some(Node::ActiveLeaf(leaf))) => {
                leaf.learn_from_instance(instance, class_index, weight, config, rng);
                let weight_seen = leaf.get_weight_seen();
                if self.growth_allowed
                    && weight_seen - leaf.get_weight_seen_at_last_split_evaluation()
                        >= config.grace_period as f64
                {
                    split_attempt_at = Some(weight_seen);
                }
            }
            Some(Some(Node::InactiveLeaf(leaf))) => leaf.learn_from_instance(class_index, weight),
            _ => {}
        }

        if let Some(weight_seen) = split_attempt_at {
            self.attempt_to_split(&found, rng);
            if let Some(Node::ActiveLeaf(leaf)) = self.node_mut(leaf_id) {
                leaf.set_weight_seen_at_last_split_evaluation(weight_seen);
            }
        }

        self.training_weight_seen_by_model += weight;
    }

    fn attempt_to_split(&mut self, found: &FoundNode, rng: &mut StdRng) {
        let Some(Node::ActiveLeaf(leaf)) = found.node.and_then(|id| self.node(id)) else {
            return;
        };
        if leaf.observed_class_distribution().is_pure() {
            return;
        }

        let pre_split = leaf.observed_class_distribution().clone();
        let weight_seen = leaf.get_weight_seen();
        let mut best_suggestions =
            leaf.get_best_split_suggestions(self.split_criterion.as_ref(), &self.config, rng);
        sort_by_merit(&mut best_suggestions);

        let should_split = if best_suggestions.len() < 2 {
            best_suggestions.len() == 1
        } else {
            let best = &best_suggestions[best_suggestions.len() - 1];
            let second_best = &best_suggestions[best_suggestions.len() - 2];
            split_is_justified(
                best.get_merit() - second_best.get_merit(),
                self.split_criterion.get_range_of_merit(pre_split.as_slice()),
                &self.config,
                weight_seen,
            )
        };
        if !should_split {
            return;
        }

        let Some(split_decision) = best_suggestions.pop() else {
            return;
        };
        match split_decision.get_split_test() {
            None => self.deactivate_learning_node(found, pre_split),
            Some(test) => {
                let test = test.clone_box();
                self.split_learning_node(found, test, &split_decision, pre_split, rng)
            }
        }
    }

    fn deactivate_learning_node(&mut self, found: &FoundNode, observed: ClassDistribution) {
        let inactive = self.alloc(Node::InactiveLeaf(InactiveLearningNode::new(observed)));
        self.replace_node(found, inactive);
        self.active_leaf_node_count -= 1;
        self.inactive_leaf_node_count += 1;
        trace!(node = inactive, "leaf deactivated");
    }

    fn split_learning_node(
        &mut self,
        found: &FoundNode,
        split_test: Box<dyn InstanceConditionalTest>,
        split_decision: &AttributeSplitSuggestion,
        observed: ClassDistribution,
        rng: &mut StdRng,
    ) {
        let multiway = split_test.is_multiway();
        let num_splits = split_decision.number_of_splits();
        let mut split = SplitNode::new(split_test, observed, num_splits);

        let mut new_leaves = 0;
        for i in 0..num_splits {
            if multiway && !rng.random_bool(0.5) {
                continue;
            }
            let child = self.alloc(Self::new_learning_node(ClassDistribution::from(
                split_decision.resulting_class_distribution_from_split(i),
            )));
            split.set_child(i, child);
            new_leaves += 1;
        }

        trace!(
            condition = %split.split_test().describe_condition_for_branch(0),
            merit = split_decision.get_merit(),
            children = new_leaves,
            "leaf split"
        );

        let split_id = self.alloc(Node::Split(split));
        self.replace_node(found, split_id);
        self.active_leaf_node_count = self.active_leaf_node_count - 1 + new_leaves;
        self.decision_node_count += 1;
    }
}

impl Classifier for HoeffdingTree {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        self.votes(instance)
    }

    fn set_model_context(&mut self, _header: Arc<InstanceHeader>) {}

    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<()> {
        let mut rng = self.rng.clone();
        self.train_weighted(instance, instance.weight(), &mut rng);
        self.rng = rng;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::hoeffding_tree::leaf_prediction_option::LeafPredictionOption;
    use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterionChoice;
    use crate::core::instances::DenseInstance;
    use crate::testing::{header_mixed, header_numeric, labelled};
    use approx::assert_abs_diff_eq;

    fn majority_tree(grace_period: usize) -> HoeffdingTree {
        HoeffdingTree::new(HoeffdingTreeConfig {
            grace_period,
            leaf_prediction: LeafPredictionOption::MajorityClass,
            ..HoeffdingTreeConfig::default()
        })
        .unwrap()
    }

    /// class = x0 > 0.5, x1 is noise.
    fn threshold_stream(n: usize, seed: u64) -> Vec<DenseInstance> {
        let header = header_numeric(2, 2);
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let x0: f64 = rng.random();
                let x1: f64 = rng.random();
                labelled(&header, &[x0, x1], usize::from(x0 > 0.5))
            })
            .collect()
    }

    #[test]
    fn hoeffding_bound_shrinks_with_more_weight() {
        let mut last = f64::INFINITY;
        for n in [10.0, 100.0, 1_000.0, 10_000.0] {
            let eps = compute_hoeffding_bound(1.0, 0.01, n);
            assert!(eps > 0.0 && eps < last);
            last = eps;
        }
        assert_abs_diff_eq!(
            compute_hoeffding_bound(1.0, 0.01, 200.0),
            ((100f64).ln() / 400.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn hoeffding_bound_shrinks_as_confidence_is_relaxed() {
        let mut last = f64::INFINITY;
        for delta in [1e-9, 1e-6, 1e-3, 0.01, 0.1, 0.5, 0.9] {
            let eps = compute_hoeffding_bound(1.0, delta, 500.0);
            assert!(eps >= 0.0 && eps < last, "delta {delta} gave {eps}");
            last = eps;
        }
    }

    #[test]
    fn fixed_merit_gap_splits_from_some_weight_onwards() {
        let config = HoeffdingTreeConfig {
            tie_threshold: 0.0,
            ..HoeffdingTreeConfig::default()
        };
        let gap = 0.1;
        let decisions: Vec<bool> = (1..=2_000)
            .map(|n| split_is_justified(gap, 1.0, &config, n as f64))
            .collect();
        let first = decisions.iter().position(|d| *d).unwrap();
        assert!(first > 0);
        assert!(decisions[..first].iter().all(|d| !d));
        assert!(decisions[first..].iter().all(|d| *d));

        // ln(1/0.01) / (2 * 0.1^2) = 230.26
        assert_eq!(first + 1, 231);
    }

    #[test]
    fn tie_threshold_forces_a_split_on_equal_merits() {
        let config = HoeffdingTreeConfig {
            tie_threshold: 0.05,
            ..HoeffdingTreeConfig::default()
        };
        assert!(!split_is_justified(0.0, 1.0, &config, 100.0));
        assert!(split_is_justified(0.0, 1.0, &config, 10_000.0));
    }

    #[test]
    fn untrained_tree_votes_zeros_for_every_class() {
        let tree = majority_tree(10);
        let header = header_numeric(2, 3);
        let inst = labelled(&header, &[0.1, 0.2], 2);
        assert_eq!(tree.votes(&inst), vec![0.0, 0.0, 0.0]);
        assert!(!tree.correctly_classifies(&inst));
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn first_training_call_creates_a_root_leaf() {
        let mut tree = majority_tree(10);
        let header = header_numeric(2, 2);
        let mut rng = StdRng::seed_from_u64(1);

        tree.train_weighted(&labelled(&header, &[0.3, 0.4], 1), 3.0, &mut rng);

        assert!(tree.is_trained());
        assert_eq!(tree.active_leaf_node_count(), 1);
        assert_eq!(tree.decision_node_count(), 0);
        assert_eq!(tree.training_weight_seen(), 3.0);
        let root = tree.root().unwrap();
        assert_eq!(
            tree.node(root).unwrap().observed_class_distribution().as_slice(),
            &[0.0, 3.0]
        );
    }

    #[test]
    fn ignores_unlabelled_and_non_positive_weights() {
        let mut tree = majority_tree(10);
        let header = header_numeric(1, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let unlabelled = DenseInstance::new(header.clone(), vec![0.3, f64::NAN], 1.0);

        tree.train_weighted(&unlabelled, 1.0, &mut rng);
        tree.train_weighted(&labelled(&header, &[0.3], 0), 0.0, &mut rng);
        assert!(!tree.is_trained());
    }

    #[test]
    fn pure_leaf_never_splits() {
        let mut tree = majority_tree(5);
        let header = header_numeric(2, 2);
        let mut rng = StdRng::seed_from_u64(2);
        for i in 0..200 {
            let x = i as f64 / 200.0;
            tree.train_weighted(&labelled(&header, &[x, 1.0 - x], 1), 1.0, &mut rng);
        }
        assert_eq!(tree.decision_node_count(), 0);
        assert_eq!(tree.active_leaf_node_count(), 1);
    }

    #[test]
    fn learns_a_threshold_and_conserves_mass_on_split() {
        let mut tree = majority_tree(50);
        let mut rng = StdRng::seed_from_u64(5);
        let data = threshold_stream(2_000, 9);

        for inst in &data {
            tree.train_weighted(inst, 1.0, &mut rng);
        }
        assert!(tree.decision_node_count() >= 1);

        let root = tree.root().unwrap();
        let Some(Node::Split(split)) = tree.node(root) else {
            panic!("root should be a decision node");
        };
        let parent_mass = split.observed_class_distribution().total_weight();
        let children_mass: f64 = split
            .children()
            .map(|c| tree.node(c).unwrap().observed_class_distribution().total_weight())
            .sum();
        // children were seeded with the split's branch distributions and kept learning
        assert!(children_mass >= parent_mass - 1e-6);

        let correct = data.iter().filter(|i| tree.correctly_classifies(*i)).count();
        assert!(correct as f64 / data.len() as f64 >= 0.9);
    }

    #[test]
    fn children_are_seeded_with_the_whole_pre_split_distribution() {
        let mut tree = majority_tree(20);
        let mut rng = StdRng::seed_from_u64(11);

        for inst in threshold_stream(2_000, 3) {
            tree.train_weighted(&inst, 1.0, &mut rng);
            if tree.decision_node_count() == 1 {
                break;
            }
        }
        assert_eq!(tree.decision_node_count(), 1);

        let root = tree.root().unwrap();
        let Some(Node::Split(split)) = tree.node(root) else {
            panic!("root should be a decision node");
        };
        assert!(!split.split_test().is_multiway());
        assert_eq!(split.children().count(), 2);

        let pre_split = split.observed_class_distribution();
        let mut seeded = vec![0.0; pre_split.len()];
        for child in split.children() {
            let child_dist = tree.node(child).unwrap().observed_class_distribution();
            for (class, weight) in child_dist.as_slice().iter().enumerate() {
                seeded[class] += weight;
            }
        }
        for (class, total) in pre_split.as_slice().iter().enumerate() {
            assert_abs_diff_eq!(seeded[class], *total, epsilon = 1e-6);
        }
    }

    #[test]
    fn deactivated_leaf_keeps_counting_classes() {
        let mut tree = majority_tree(20);
        let header = header_numeric(1, 2);
        let mut rng = StdRng::seed_from_u64(6);

        // a constant feature yields no split candidate, so the null candidate wins
        for i in 0..20 {
            tree.train_weighted(&labelled(&header, &[0.5], i % 2), 1.0, &mut rng);
        }
        assert_eq!(tree.inactive_leaf_node_count(), 1);
        assert_eq!(tree.active_leaf_node_count(), 0);

        let positive = labelled(&header, &[0.5], 1);
        for _ in 0..200 {
            tree.train_weighted(&positive, 1.0, &mut rng);
        }
        assert_eq!(tree.votes(&positive), vec![10.0, 210.0]);
        assert!(tree.correctly_classifies(&positive));
        assert_eq!(tree.training_weight_seen(), 220.0);
    }

    #[test]
    fn counts_stay_consistent_with_the_arena() {
        let mut tree = majority_tree(30);
        let mut rng = StdRng::seed_from_u64(8);
        for inst in threshold_stream(3_000, 4) {
            tree.train_weighted(&inst, 1.0, &mut rng);
        }

        let mut splits = 0;
        let mut active = 0;
        let mut inactive = 0;
        let mut stack = vec![tree.root().unwrap()];
        while let Some(id) = stack.pop() {
            match tree.node(id).unwrap() {
                Node::Split(s) => {
                    splits += 1;
                    stack.extend(s.children());
                }
                Node::ActiveLeaf(_) => active += 1,
                Node::InactiveLeaf(_) => inactive += 1,
            }
        }
        assert_eq!(splits, tree.decision_node_count());
        assert_eq!(active, tree.active_leaf_node_count());
        assert_eq!(inactive, tree.inactive_leaf_node_count());
        assert!(tree.depth() >= 1);
    }

    #[test]
    fn missing_value_stops_at_the_decision_node() {
        let mut tree = majority_tree(50);
        let mut rng = StdRng::seed_from_u64(5);
        for inst in threshold_stream(2_000, 9) {
            tree.train_weighted(&inst, 1.0, &mut rng);
        }
        let root = tree.root().unwrap();
        let Some(Node::Split(split)) = tree.node(root) else {
            panic!("root should be a decision node");
        };
        let tested = split.split_test().get_atts_test_depends_on()[0];

        let header = header_numeric(2, 2);
        let mut values = vec![0.2, 0.2, 0.0];
        values[tested] = f64::NAN;
        let inst = DenseInstance::new(header, values, 1.0);

        let found = tree.filter_instance_to_leaf(&inst);
        assert_eq!(found.node, Some(root));
        assert_eq!(
            tree.votes(&inst),
            split.observed_class_distribution().to_vec()
        );
    }

    #[test]
    fn multiway_split_keeps_about_half_the_branches() {
        let header = header_mixed();
        let config = HoeffdingTreeConfig {
            grace_period: 20,
            leaf_prediction: LeafPredictionOption::MajorityClass,
            split_criterion: SplitCriterionChoice::Gini,
            ..HoeffdingTreeConfig::default()
        };

        let mut kept = 0;
        let mut slots = 0;
        for seed in 0..40 {
            let mut tree = HoeffdingTree::new(config.clone()).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            // the root is evaluated exactly once, at the 20th instance
            for i in 0..20 {
                let colour = i % 3;
                let class = usize::from(colour == 2);
                tree.train_weighted(&labelled(&header, &[0.5, colour as f64], class), 1.0, &mut rng);
            }
            if let Some(Node::Split(split)) = tree.root().and_then(|r| tree.node(r)) {
                if split.split_test().is_multiway() {
                    slots += split.num_children();
                    kept += split.children().count();
                }
            }
        }
        assert!(slots > 0);
        let ratio = kept as f64 / slots as f64;
        assert!(ratio > 0.25 && ratio < 0.75, "kept ratio {ratio}");
    }

    #[test]
    fn empty_slot_gets_a_fresh_leaf_when_reached() {
        let header = header_mixed();
        let config = HoeffdingTreeConfig {
            grace_period: 20,
            leaf_prediction: LeafPredictionOption::MajorityClass,
            split_criterion: SplitCriterionChoice::Gini,
            ..HoeffdingTreeConfig::default()
        };
        let mut tree = HoeffdingTree::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for i in 0..300 {
            let colour = i % 3;
            tree.train_weighted(
                &labelled(&header, &[0.5, colour as f64], usize::from(colour == 2)),
                1.0,
                &mut rng,
            );
        }
        // after enough traffic every reachable branch of the root holds a node
        if let Some(Node::Split(split)) = tree.root().and_then(|r| tree.node(r)) {
            if split.split_test().is_multiway() {
                assert_eq!(split.children().count(), split.num_children());
            }
        }
    }

    #[test]
    fn classifier_interface_trains_with_instance_weight() {
        let mut tree = majority_tree(10).with_seed(3);
        let header = header_numeric(1, 2);
        tree.set_model_context(header.clone());
        let inst = DenseInstance::new(header, vec![0.1, 1.0], 2.5);

        tree.train_on_instance(&inst).unwrap();
        assert_eq!(tree.training_weight_seen(), 2.5);
        assert_eq!(tree.get_votes_for_instance(&inst), vec![0.0, 2.5]);
    }
}
