use crate::core::class_distribution::ClassDistribution;

/// A leaf that stopped growing. It still counts class weight but keeps no attribute
/// observers, and predicts the majority class.
pub struct InactiveLearningNode {
    observed_class_distribution: ClassDistribution,
}

impl InactiveLearningNode {
    pub fn new(observed_class_distribution: ClassDistribution) -> Self {
        Self {
            observed_class_distribution,
        }
    }

    pub fn observed_class_distribution(&self) -> &ClassDistribution {
        &self.observed_class_distribution
    }

    pub fn learn_from_instance(&mut self, class_index: usize, weight: f64) {
        self.observed_class_distribution
            .add_to_value(class_index, weight);
    }

    pub fn get_class_votes(&self) -> Vec<f64> {
        self.observed_class_distribution.to_vec()
    }
}
