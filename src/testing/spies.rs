use crate::classifiers::Classifier;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::Result;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

pub struct TrainSpyHandle(Arc<AtomicU64>);

impl TrainSpyHandle {
    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Always votes for class 0 and counts training calls.
pub struct TrainSpyClassifier {
    count: Arc<AtomicU64>,
    num_classes: usize,
}

impl TrainSpyClassifier {
    pub fn new() -> (Self, TrainSpyHandle) {
        let counter = Arc::new(AtomicU64::new(0));
        (
            Self {
                count: counter.clone(),
                num_classes: 2,
            },
            TrainSpyHandle(counter),
        )
    }
}

impl Classifier for TrainSpyClassifier {
    fn get_votes_for_instance(&self, _instance: &dyn Instance) -> Vec<f64> {
        let mut v = vec![0.0; self.num_classes.max(2)];
        v[0] = 1.0;
        v
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.num_classes = header.number_of_classes();
    }

    fn train_on_instance(&mut self, _instance: &dyn Instance) -> Result<()> {
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
