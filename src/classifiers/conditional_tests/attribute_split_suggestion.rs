use crate::classifiers::hoeffding_tree::instance_conditional_test::InstanceConditionalTest;

/// A candidate split of a leaf. `split_test == None` is the "do not split" candidate.
#[derive(Clone, Debug)]
pub struct AttributeSplitSuggestion {
    split_test: Option<Box<dyn InstanceConditionalTest>>,
    resulting_class_distributions: Vec<Vec<f64>>,
    merit: f64,
}

impl AttributeSplitSuggestion {
    pub fn new(
        split_test: Option<Box<dyn InstanceConditionalTest>>,
        resulting_class_distributions: Vec<Vec<f64>>,
        merit: f64,
    ) -> Self {
        Self {
            split_test,
            resulting_class_distributions,
            merit,
        }
    }

    pub fn get_merit(&self) -> f64 {
        self.merit
    }

    pub fn get_split_test(&self) -> Option<&dyn InstanceConditionalTest> {
        self.split_test.as_deref()
    }

    pub fn number_of_splits(&self) -> usize {
        self.resulting_class_distributions.len()
    }

    pub fn resulting_class_distribution_from_split(&self, split_index: usize) -> Vec<f64> {
        self.resulting_class_distributions
            .get(split_index)
            .cloned()
            .unwrap_or_default()
    }

    pub fn resulting_class_distributions(&self) -> &[Vec<f64>] {
        &self.resulting_class_distributions
    }
}

/// Ascending by merit, ties keep their evaluation order.
pub fn sort_by_merit(suggestions: &mut [AttributeSplitSuggestion]) {
    suggestions.sort_by(|a, b| a.merit.total_cmp(&b.merit));
}
