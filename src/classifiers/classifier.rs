use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::Result;
use std::sync::Arc;

pub trait Classifier: Send {
    /// Class votes for `instance` without touching any learner state.
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64>;

    /// Votes for a labelled instance in a test-then-train loop. Learners that keep
    /// online statistics about their own predictions update them here.
    fn test_on_instance(&mut self, instance: &dyn Instance) -> Vec<f64> {
        self.get_votes_for_instance(instance)
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>);

    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<()>;
}
