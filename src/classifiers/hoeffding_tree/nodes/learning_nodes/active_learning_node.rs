use crate::classifiers::attribute_class_observers::{
    AttributeClassObserver, GaussianNumericAttributeClassObserver, NominalAttributeClassObserver,
};
use crate::classifiers::bayes::do_naive_bayes_prediction;
use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::hoeffding_tree_config::HoeffdingTreeConfig;
use crate::classifiers::hoeffding_tree::leaf_prediction_option::LeafPredictionOption;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::core::class_distribution::{ClassDistribution, max_index};
use crate::core::instances::Instance;
use rand::rngs::StdRng;
use rand::seq::index;

/// A growing leaf: class distribution plus one observer per feature of its subset.
pub struct ActiveLearningNode {
    observed_class_distribution: ClassDistribution,
    weight_seen_at_last_split_evaluation: f64,
    attribute_observers: Vec<Option<Box<dyn AttributeClassObserver>>>,
    feature_subset: Option<Vec<usize>>,
    mc_correct_weight: f64,
    nb_correct_weight: f64,
}

impl ActiveLearningNode {
    pub fn new(observed_class_distribution: ClassDistribution) -> Self {
        let weight_seen = observed_class_distribution.total_weight();
        Self {
            observed_class_distribution,
            weight_seen_at_last_split_evaluation: weight_seen,
            attribute_observers: Vec::new(),
            feature_subset: None,
            mc_correct_weight: 0.0,
            nb_correct_weight: 0.0,
        }
    }

    pub fn observed_class_distribution(&self) -> &ClassDistribution {
        &self.observed_class_distribution
    }

    pub fn get_weight_seen(&self) -> f64 {
        self.observed_class_distribution.total_weight()
    }

    pub fn get_weight_seen_at_last_split_evaluation(&self) -> f64 {
        self.weight_seen_at_last_split_evaluation
    }

    pub fn set_weight_seen_at_last_split_evaluation(&mut self, weight: f64) {
        self.weight_seen_at_last_split_evaluation = weight;
    }

    /// Model indices this leaf tracks, fixed on the first training call.
    pub fn feature_subset(&self) -> Option<&[usize]> {
        self.feature_subset.as_deref()
    }

    pub fn learn_from_instance(
        &mut self,
        instance: &dyn Instance,
        class_index: usize,
        weight: f64,
        config: &HoeffdingTreeConfig,
        rng: &mut StdRng,
    ) {
        if config.leaf_prediction == LeafPredictionOption::AdaptiveNaiveBayes {
            if self.observed_class_distribution.max_index() == Some(class_index) {
                self.mc_correct_weight += weight;
            }
            let nb_votes = do_naive_bayes_prediction(
                instance,
                self.observed_class_distribution.as_slice(),
                &self.attribute_observers,
            );
            if max_index(&nb_votes) == Some(class_index) {
                self.nb_correct_weight += weight;
            }
        }

        self.observed_class_distribution
            .add_to_value(class_index, weight);

        let header = instance.header();
        let num_features = header.number_of_features();
        if self.attribute_observers.len() < num_features {
            self.attribute_observers.resize_with(num_features, || None);
        }

        let subset = self
            .feature_subset
            .get_or_insert_with(|| draw_feature_subset(num_features, config.subspace_size, rng));

        for &i in subset.iter() {
            let Some(value) = instance.feature_value(i) else {
                continue;
            };
            let observer = self.attribute_observers[i].get_or_insert_with(|| {
                if header.is_nominal_feature(i) {
                    Box::new(NominalAttributeClassObserver::new()) as Box<dyn AttributeClassObserver>
                } else {
                    Box::new(GaussianNumericAttributeClassObserver::new(
                        config.numeric_split_points,
                    ))
                }
            });
            observer.observe_attribute_class(value, class_index, weight);
        }
    }

    pub fn get_class_votes(&self, instance: &dyn Instance, config: &HoeffdingTreeConfig) -> Vec<f64> {
        let majority = || self.observed_class_distribution.to_vec();
        let naive_bayes = || {
            do_naive_bayes_prediction(
                instance,
                self.observed_class_distribution.as_slice(),
                &self.attribute_observers,
            )
        };

        match config.leaf_prediction {
            LeafPredictionOption::MajorityClass => majority(),
            LeafPredictionOption::NaiveBayes => {
                if self.get_weight_seen() >= config.nb_threshold as f64 {
                    naive_bayes()
                } else {
                    majority()
                }
            }
            LeafPredictionOption::AdaptiveNaiveBayes => {
                if self.mc_correct_weight > self.nb_correct_weight {
                    majority()
                } else {
                    naive_bayes()
                }
            }
        }
    }

    /// The "do not split" candidate first (unless pre-pruning is off), then one
    /// candidate per observed feature in index order.
    pub fn get_best_split_suggestions(
        &self,
        criterion: &dyn SplitCriterion,
        config: &HoeffdingTreeConfig,
        rng: &mut StdRng,
    ) -> Vec<AttributeSplitSuggestion> {
        let mut best_suggestions = Vec::new();
        let pre_split_distribution = self.observed_class_distribution.as_slice();

        if !config.no_pre_prune {
            let merit = criterion.get_merit_of_split(
                pre_split_distribution,
                &[pre_split_distribution.to_vec()],
            );
            best_suggestions.push(AttributeSplitSuggestion::new(
                None,
                vec![pre_split_distribution.to_vec()],
                merit,
            ));
        }

        for (i, obs) in self.attribute_observers.iter().enumerate() {
            let Some(obs) = obs else { continue };
            if let Some(suggestion) = obs.get_best_evaluated_split_suggestion(
                criterion,
                pre_split_distribution,
                i,
                config.binary_splits,
                rng,
            ) {
                best_suggestions.push(suggestion);
            }
        }
        best_suggestions
    }
}

/// `size` distinct feature indices out of `num_features`, sorted. `0` or anything at
/// least `num_features` selects every feature.
pub fn draw_feature_subset(num_features: usize, size: usize, rng: &mut StdRng) -> Vec<usize> {
    if size == 0 || size >= num_features {
        return (0..num_features).collect();
    }
    let mut subset = index::sample(rng, num_features, size).into_vec();
    subset.sort_unstable();
    subset
}
