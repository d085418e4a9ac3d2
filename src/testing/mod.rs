mod spies;
mod stubs;

pub use spies::{TrainSpyClassifier, TrainSpyHandle};
pub use stubs::{OracleClassifier, ScriptedChangeDetector, VecStream};

use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::DenseInstance;
use std::sync::Arc;

fn class_attribute(n_classes: usize) -> AttributeRef {
    Arc::new(NominalAttribute::with_values(
        "class".into(),
        (0..n_classes).map(|c| format!("c{c}")).collect(),
    ))
}

/// `n_features` numeric attributes followed by a nominal class attribute.
pub fn header_numeric(n_features: usize, n_classes: usize) -> Arc<InstanceHeader> {
    let mut attributes: Vec<AttributeRef> = (0..n_features)
        .map(|i| Arc::new(NumericAttribute::new(format!("x{i}"))) as AttributeRef)
        .collect();
    attributes.push(class_attribute(n_classes));
    Arc::new(InstanceHeader::new("numeric".into(), attributes, n_features))
}

/// `[x: numeric, colour: {red, green, blue}, class: {c0, c1}]`.
pub fn header_mixed() -> Arc<InstanceHeader> {
    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NumericAttribute::new("x".into())),
        Arc::new(NominalAttribute::with_values(
            "colour".into(),
            vec!["red".into(), "green".into(), "blue".into()],
        )),
        class_attribute(2),
    ];
    Arc::new(InstanceHeader::new("mixed".into(), attributes, 2))
}

pub fn labelled(header: &Arc<InstanceHeader>, features: &[f64], class: usize) -> DenseInstance {
    let mut values = features.to_vec();
    values.push(class as f64);
    DenseInstance::new(Arc::clone(header), values, 1.0)
}
