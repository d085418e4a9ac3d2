use crate::core::attributes::Attribute;
use crate::core::instance_header::InstanceHeader;

/// A labelled example flowing through the stream. Values are stored as `f64`: numeric
/// values directly, nominal values as the index of the label, missing values as `NaN`.
pub trait Instance: Send + Sync {
    fn weight(&self) -> f64;

    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn is_missing_at_index(&self, index: usize) -> bool {
        self.value_at_index(index).is_none_or(f64::is_nan)
    }

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.header().attribute_at_index(index)
    }

    fn number_of_attributes(&self) -> usize {
        self.header().number_of_attributes()
    }

    fn class_index(&self) -> usize {
        self.header().class_index()
    }

    fn class_value(&self) -> Option<f64> {
        self.value_at_index(self.class_index())
            .filter(|v| !v.is_nan())
    }

    fn number_of_classes(&self) -> usize {
        self.header().number_of_classes()
    }

    fn header(&self) -> &InstanceHeader;

    /// Value of the model attribute `model_index`, i.e. the attribute index with the
    /// class attribute skipped.
    fn feature_value(&self, model_index: usize) -> Option<f64> {
        self.value_at_index(model_attribute_index_to_instance_index(
            model_index,
            self.class_index(),
        ))
    }
}

pub fn model_attribute_index_to_instance_index(model_index: usize, class_index: usize) -> usize {
    if class_index > model_index {
        model_index
    } else {
        model_index + 1
    }
}
