mod attribute_class_observer;
mod gaussian_numeric_attribute_class_observer;
mod nominal_attribute_class_observer;

pub use attribute_class_observer::AttributeClassObserver;
pub use gaussian_numeric_attribute_class_observer::{
    GaussianNumericAttributeClassObserver, NumericSplitPoints,
};
pub use nominal_attribute_class_observer::NominalAttributeClassObserver;
