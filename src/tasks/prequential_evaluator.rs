use crate::classifiers::Classifier;
use crate::error::{ArteError, Result};
use crate::evaluation::{LearningCurve, PerformanceEvaluator, Snapshot};
use crate::streams::Stream;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use cpu_time::ThreadTime;
use tracing::debug;

/// Test-then-train loop: every instance is first predicted (the learner may update its
/// own prediction statistics), scored, and then used for training.
pub struct PrequentialEvaluator {
    learner: Box<dyn Classifier>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn PerformanceEvaluator>,

    curve: LearningCurve,

    max_instances: Option<u64>,
    max_seconds: Option<u64>,
    sample_frequency: u64,

    processed: u64,
    start_cpu: ThreadTime,
    progress_tx: Option<Sender<Snapshot>>,
}

impl PrequentialEvaluator {
    pub fn new(
        mut learner: Box<dyn Classifier>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn PerformanceEvaluator>,
        max_instances: Option<u64>,
        max_seconds: Option<u64>,
        sample_frequency: u64,
    ) -> Result<Self> {
        if sample_frequency == 0 {
            return Err(ArteError::invalid("sample_frequency", "must be > 0"));
        }

        learner.set_model_context(Arc::new(stream.header().clone()));

        Ok(Self {
            learner,
            stream,
            evaluator,
            curve: LearningCurve::default(),
            max_instances,
            max_seconds,
            sample_frequency,
            processed: 0,
            start_cpu: ThreadTime::now(),
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<Snapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_cpu = ThreadTime::now();

        while self.stream.has_more_instances() {
            if self.max_instances.is_some_and(|n| self.processed >= n) {
                break;
            }
            if self
                .max_seconds
                .is_some_and(|s| self.start_cpu.elapsed().as_secs() >= s)
            {
                break;
            }

            let Some(instance) = self.stream.next_instance() else {
                break;
            };
            self.processed += 1;

            let votes = self.learner.test_on_instance(instance.as_ref());
            self.evaluator.add_result(instance.as_ref(), &votes);
            self.learner.train_on_instance(instance.as_ref())?;

            if self.processed % self.sample_frequency == 0 {
                self.push_snapshot();
            }
        }

        if self.curve.latest().map(|s| s.instances_seen) != Some(self.processed) {
            self.push_snapshot();
        }
        debug!(instances = self.processed, "prequential evaluation finished");
        Ok(())
    }

    pub fn curve(&self) -> &LearningCurve {
        &self.curve
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    fn push_snapshot(&mut self) {
        let mut accuracy = f64::NAN;
        let mut kappa = f64::NAN;
        let mut extras = BTreeMap::new();

        for m in self.evaluator.performance() {
            match m.name.as_ref() {
                "accuracy" => accuracy = m.value,
                "kappa" => kappa = m.value,
                other => {
                    extras.insert(other.to_string(), m.value);
                }
            }
        }

        let snapshot = Snapshot {
            instances_seen: self.processed,
            accuracy,
            kappa,
            seconds: self.start_cpu.elapsed().as_secs_f64(),
            extras,
        };

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot.clone());
        }
        self.curve.push(snapshot);
    }
}
