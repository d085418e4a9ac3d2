use crate::classifiers::hoeffding_tree::{HoeffdingTree, HoeffdingTreeConfig};
use crate::core::class_distribution::max_index;
use crate::core::instances::Instance;
use crate::drift::ChangeDetector;
use crate::ensemble::accuracy_window::AccuracyWindow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Correct predictions of a class skipped between two regularized training rounds.
const REGULARIZED_TRAINING_PERIOD: u64 = 5;

/// SplitMix64 finaliser over the ensemble seed, the step counter and the member ordinal.
pub fn member_seed(ensemble_seed: u64, instances_seen: u64, index: usize) -> u64 {
    let mut z = ensemble_seed
        .wrapping_add(instances_seen.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add((index as u64).wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Uniform draw from `[min, num_features]`, with `min` clamped into `[1, num_features]`.
pub fn draw_subspace_size(rng: &mut StdRng, min: usize, num_features: usize) -> usize {
    if num_features == 0 {
        return 0;
    }
    let low = min.clamp(1, num_features);
    rng.random_range(low..=num_features)
}

/// One ensemble member: a randomized Hoeffding tree restricted to `subspace_size`
/// features per leaf, its drift detector, and the accuracy window used for vote gating.
pub struct ArteBaseLearner {
    index: usize,
    tree_config: HoeffdingTreeConfig,
    tree: HoeffdingTree,
    detector_template: Option<Box<dyn ChangeDetector>>,
    detector: Option<Box<dyn ChangeDetector>>,
    window: AccuracyWindow,
    rng: StdRng,
    subspace_size: usize,
    min_subspace_size: usize,
    num_features: usize,
    created_on: u64,
    last_drift_on: u64,
    number_of_drifts: u64,
    correct_per_class: Vec<u64>,
}

impl ArteBaseLearner {
    /// `tree_config` and `window_size` must already be validated.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        index: usize,
        tree_config: HoeffdingTreeConfig,
        subspace_size: usize,
        min_subspace_size: usize,
        num_features: usize,
        detector_template: Option<Box<dyn ChangeDetector>>,
        window_size: usize,
        created_on: u64,
    ) -> Self {
        let tree = Self::fresh_tree(&tree_config, subspace_size);
        let detector = detector_template.as_ref().map(|d| d.clone_box());
        Self {
            index,
            tree_config,
            tree,
            detector_template,
            detector,
            window: AccuracyWindow::with_validated_capacity(window_size),
            rng: StdRng::seed_from_u64(index as u64),
            subspace_size,
            min_subspace_size,
            num_features,
            created_on,
            last_drift_on: 0,
            number_of_drifts: 0,
            correct_per_class: Vec::new(),
        }
    }

    fn fresh_tree(config: &HoeffdingTreeConfig, subspace_size: usize) -> HoeffdingTree {
        HoeffdingTree::with_validated_config(HoeffdingTreeConfig {
            subspace_size,
            ..config.clone()
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tree(&self) -> &HoeffdingTree {
        &self.tree
    }

    pub fn subspace_size(&self) -> usize {
        self.subspace_size
    }

    pub fn created_on(&self) -> u64 {
        self.created_on
    }

    pub fn last_drift_on(&self) -> u64 {
        self.last_drift_on
    }

    pub fn number_of_drifts(&self) -> u64 {
        self.number_of_drifts
    }

    pub fn window(&self) -> &AccuracyWindow {
        &self.window
    }

    pub fn window_accuracy(&self) -> Option<f64> {
        self.window.current_accuracy()
    }

    pub fn has_drift_detector(&self) -> bool {
        self.detector.is_some()
    }

    pub fn reseed(&mut self, ensemble_seed: u64, instances_seen: u64) {
        self.rng = StdRng::seed_from_u64(member_seed(ensemble_seed, instances_seen, self.index));
    }

    pub fn votes(&self, instance: &dyn Instance) -> Vec<f64> {
        self.tree.votes(instance)
    }

    /// Records whether `votes` picked the label of `instance`. Unlabelled instances
    /// leave the window untouched.
    pub fn record_outcome(&mut self, instance: &dyn Instance, votes: &[f64]) {
        if let Some(class) = instance.class_value() {
            self.window.record(max_index(votes).unwrap_or(0) == class as usize);
        }
    }

    /// Regularized training filter: misclassified instances always pass, correct ones
    /// only every fifth time per class.
    pub fn accepts_for_regularized_training(&mut self, instance: &dyn Instance) -> bool {
        let Some(class) = instance.class_value() else {
            return false;
        };
        if !self.tree.correctly_classifies(instance) {
            return true;
        }
        let class = class as usize;
        if class >= self.correct_per_class.len() {
            self.correct_per_class.resize(class + 1, 0);
        }
        self.correct_per_class[class] += 1;
        self.correct_per_class[class] % REGULARIZED_TRAINING_PERIOD == 0
    }

    /// Trains the tree with weight `instance.weight() * k`, then feeds the post-training
    /// error to the drift detector and resets the member when it fires.
    pub fn train(&mut self, instance: &dyn Instance, k: f64, instances_seen: u64) {
        self.tree
            .train_weighted(instance, instance.weight() * k, &mut self.rng);

        let Some(detector) = self.detector.as_mut() else {
            return;
        };
        let error = if self.tree.correctly_classifies(instance) {
            0.0
        } else {
            1.0
        };
        detector.input(error);
        if detector.detected_change() {
            self.last_drift_on = instances_seen;
            self.number_of_drifts += 1;
            debug!(
                member = self.index,
                instances_seen,
                drifts = self.number_of_drifts,
                "drift detected, resetting member"
            );
            self.reset(instances_seen);
        }
    }

    /// Replaces the tree, the detector and the window, and redraws the subspace size.
    /// Ordinal and drift history are kept.
    pub fn reset(&mut self, instances_seen: u64) {
        self.subspace_size =
            draw_subspace_size(&mut self.rng, self.min_subspace_size, self.num_features);
        self.tree = Self::fresh_tree(&self.tree_config, self.subspace_size);
        self.detector = self.detector_template.as_ref().map(|d| d.clone_box());
        self.window.clear();
        self.correct_per_class.clear();
        self.created_on = instances_seen;
    }
}
