use crate::classifiers::Classifier;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::drift::ChangeDetector;
use crate::error::Result;
use crate::streams::Stream;
use crate::testing::{header_numeric, labelled};
use std::sync::Arc;

/// Votes for the true label of whatever it is shown.
#[derive(Default)]
pub struct OracleClassifier {
    num_classes: usize,
}

impl Classifier for OracleClassifier {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        let y = instance.class_value().unwrap_or_default() as usize;
        let mut v = vec![0.0; self.num_classes.max(2)];
        if y < v.len() {
            v[y] = 1.0;
        }
        v
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.num_classes = header.number_of_classes();
    }

    fn train_on_instance(&mut self, _instance: &dyn Instance) -> Result<()> {
        Ok(())
    }
}

/// Reports a change on exactly the listed input counts (1-based).
#[derive(Clone, Debug, Default)]
pub struct ScriptedChangeDetector {
    fire_on: Vec<u64>,
    inputs: u64,
    change: bool,
}

impl ScriptedChangeDetector {
    pub fn firing_on(fire_on: Vec<u64>) -> Self {
        Self {
            fire_on,
            ..Self::default()
        }
    }
}

impl ChangeDetector for ScriptedChangeDetector {
    fn input(&mut self, _value: f64) {
        self.inputs += 1;
        self.change = self.fire_on.contains(&self.inputs);
    }

    fn detected_change(&self) -> bool {
        self.change
    }

    fn estimation(&self) -> f64 {
        0.0
    }

    fn clone_box(&self) -> Box<dyn ChangeDetector> {
        Box::new(Self::firing_on(self.fire_on.clone()))
    }
}

/// One numeric feature equal to the label; labels replayed from a vector.
pub struct VecStream {
    header: Arc<InstanceHeader>,
    labels: Vec<usize>,
    cursor: usize,
}

impl VecStream {
    pub fn new(labels: Vec<usize>) -> Self {
        let num_classes = labels.iter().max().map_or(2, |m| (m + 1).max(2));
        Self {
            header: header_numeric(1, num_classes),
            labels,
            cursor: 0,
        }
    }
}

impl Stream for VecStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.cursor < self.labels.len()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        let label = *self.labels.get(self.cursor)?;
        self.cursor += 1;
        Some(Box::new(labelled(&self.header, &[label as f64], label)))
    }

    fn restart(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }
}
