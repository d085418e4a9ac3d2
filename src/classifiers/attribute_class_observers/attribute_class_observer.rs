use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use rand::rngs::StdRng;

/// Per-leaf statistics of one feature, conditioned on the class.
pub trait AttributeClassObserver: Send + Sync {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize, weight: f64);

    fn probability_of_attribute_value_given_class(
        &self,
        att_val: f64,
        class_val: usize,
    ) -> Option<f64>;

    /// Best split on this feature, if any. `rng` drives randomized split-point search.
    fn get_best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_dist: &[f64],
        att_index: usize,
        binary_only: bool,
        rng: &mut StdRng,
    ) -> Option<AttributeSplitSuggestion>;
}
