use crate::core::attributes::Attribute;

#[derive(Clone, Debug)]
pub struct NumericAttribute {
    pub name: String,
}

impl NumericAttribute {
    pub fn new(name: String) -> NumericAttribute {
        NumericAttribute { name }
    }
}

impl Attribute for NumericAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_nominal(&self) -> bool {
        false
    }

    fn number_of_values(&self) -> usize {
        0
    }
}
