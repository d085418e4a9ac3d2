use crate::core::attributes::{Attribute, AttributeRef};
use std::fmt;

/// Stream metadata: the attribute list (class attribute included) and the position of
/// the class attribute within it.
#[derive(Clone)]
pub struct InstanceHeader {
    relation_name: String,
    pub attributes: Vec<AttributeRef>,
    class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Attributes a model can split on, i.e. every attribute except the class.
    pub fn number_of_features(&self) -> usize {
        self.attributes.len().saturating_sub(1)
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes.get(index).map(|a| a.as_ref() as &dyn Attribute)
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name() == name)
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn number_of_classes(&self) -> usize {
        self.attributes
            .get(self.class_index)
            .filter(|attr| attr.is_nominal())
            .map(|attr| attr.number_of_values())
            .unwrap_or(0)
    }

    /// Whether the model attribute at `model_index` (class excluded) is nominal.
    pub fn is_nominal_feature(&self, model_index: usize) -> bool {
        let index = if model_index < self.class_index {
            model_index
        } else {
            model_index + 1
        };
        self.attributes
            .get(index)
            .is_some_and(|attr| attr.is_nominal())
    }
}

impl fmt::Debug for InstanceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceHeader")
            .field("relation_name", &self.relation_name)
            .field("class_index", &self.class_index)
            .field("n_attributes", &self.attributes.len())
            .finish()
    }
}
