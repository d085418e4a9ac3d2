use crate::classifiers::attribute_class_observers::attribute_class_observer::AttributeClassObserver;
use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::instance_conditional_test::{
    NominalAttributeBinaryTest, NominalAttributeMultiwayTest,
};
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use rand::rngs::StdRng;

#[derive(Default)]
pub struct NominalAttributeClassObserver {
    total_weight_observed: f64,
    missing_weight_observed: f64,
    attribute_value_distribution_per_class: Vec<Vec<f64>>,
}

impl NominalAttributeClassObserver {
    pub fn new() -> NominalAttributeClassObserver {
        Self::default()
    }

    #[inline]
    fn ensure_value(&mut self, class_val: usize, att_val_int: usize) {
        if class_val >= self.attribute_value_distribution_per_class.len() {
            self.attribute_value_distribution_per_class
                .resize_with(class_val + 1, Vec::new);
        }
        let row = &mut self.attribute_value_distribution_per_class[class_val];
        if att_val_int >= row.len() {
            row.resize(att_val_int + 1, 0.0);
        }
    }

    pub fn total_weight_observed(&self) -> f64 {
        self.total_weight_observed
    }

    pub fn missing_weight_observed(&self) -> f64 {
        self.missing_weight_observed
    }

    pub fn get_max_att_vals_observed(&self) -> usize {
        self.attribute_value_distribution_per_class
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// One class distribution per observed value index.
    pub fn get_class_dists_resulting_from_multiway_split(
        &self,
        max_att_vals: usize,
    ) -> Vec<Vec<f64>> {
        let num_classes = self.attribute_value_distribution_per_class.len();
        let mut dists = vec![vec![0.0; num_classes]; max_att_vals];

        for (class_idx, row) in self.attribute_value_distribution_per_class.iter().enumerate() {
            for (val_idx, &count) in row.iter().enumerate() {
                dists[val_idx][class_idx] = count;
            }
        }
        dists
    }

    pub fn get_class_dists_resulting_from_binary_split(&self, val_index: usize) -> Vec<Vec<f64>> {
        let num_classes = self.attribute_value_distribution_per_class.len();
        let mut lhs = vec![0.0; num_classes];
        let mut rhs = vec![0.0; num_classes];

        for (class_idx, row) in self.attribute_value_distribution_per_class.iter().enumerate() {
            let lhs_count = row.get(val_index).copied().unwrap_or(0.0);
            lhs[class_idx] += lhs_count;
            rhs[class_idx] += row.iter().sum::<f64>() - lhs_count;
        }
        vec![lhs, rhs]
    }
}

impl AttributeClassObserver for NominalAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize, weight: f64) {
        if !weight.is_finite() || weight <= 0.0 {
            return;
        }
        if att_val.is_nan() || att_val < 0.0 {
            self.missing_weight_observed += weight;
        } else {
            let att_val_int = att_val as usize;
            self.ensure_value(class_val, att_val_int);
            self.attribute_value_distribution_per_class[class_val][att_val_int] += weight;
        }
        self.total_weight_observed += weight;
    }

    /// Laplace-smoothed over the values observed for the class.
    fn probability_of_attribute_value_given_class(
        &self,
        att_val: f64,
        class_val: usize,
    ) -> Option<f64> {
        if att_val.is_nan() {
            return None;
        }
        let row = self.attribute_value_distribution_per_class.get(class_val)?;
        if row.is_empty() {
            return None;
        }
        let count = row.get(att_val as usize).copied().unwrap_or(0.0);
        let sum: f64 = row.iter().sum();
        Some((count + 1.0) / (sum + row.len() as f64))
    }

    fn get_best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_dist: &[f64],
        att_index: usize,
        binary_only: bool,
        _rng: &mut StdRng,
    ) -> Option<AttributeSplitSuggestion> {
        let mut best: Option<AttributeSplitSuggestion> = None;
        let max_att_vals_observed = self.get_max_att_vals_observed();

        if !binary_only {
            let post_split_dists =
                self.get_class_dists_resulting_from_multiway_split(max_att_vals_observed);
            let merit = criterion.get_merit_of_split(pre_split_dist, &post_split_dists);
            best = Some(AttributeSplitSuggestion::new(
                Some(Box::new(NominalAttributeMultiwayTest::new(att_index))),
                post_split_dists,
                merit,
            ));
        }

        for val_index in 0..max_att_vals_observed {
            let post_split_dists = self.get_class_dists_resulting_from_binary_split(val_index);
            let merit = criterion.get_merit_of_split(pre_split_dist, &post_split_dists);

            if best.as_ref().is_none_or(|b| merit > b.get_merit()) {
                best = Some(AttributeSplitSuggestion::new(
                    Some(Box::new(NominalAttributeBinaryTest::new(att_index, val_index))),
                    post_split_dists,
                    merit,
                ));
            }
        }
        best
    }
}
