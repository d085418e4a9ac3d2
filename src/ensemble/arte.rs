use crate::classifiers::Classifier;
use crate::core::class_distribution::{add_values, normalize};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::drift::ChangeDetector;
use crate::ensemble::base_learner::{ArteBaseLearner, draw_subspace_size};
use crate::ensemble::config::{AccuracyUpdate, EnsembleConfig, VoteThreshold};
use crate::ensemble::executor::TrainingExecutor;
use crate::ensemble::resampling::Resampler;
use crate::error::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::info;

/// Adaptive Random Tree Ensemble.
///
/// Online bagging of randomized Hoeffding trees. Each member sees every instance `k`
/// times (`k` drawn from the resampling distribution on the calling thread), grows its
/// leaves on a random feature subset, and is reset when its drift detector fires.
/// Only members whose windowed accuracy reaches the ensemble threshold of the previous
/// round take part in the vote.
pub struct Arte {
    config: EnsembleConfig,
    header: Option<Arc<InstanceHeader>>,
    members: Vec<ArteBaseLearner>,
    executor: TrainingExecutor,
    resampler: Resampler,
    detector_template: Option<Box<dyn ChangeDetector>>,
    rng: StdRng,
    instances_seen: u64,
    vote_threshold: f64,
}

impl Arte {
    pub fn new(config: EnsembleConfig) -> Result<Self> {
        config.validate()?;
        let executor = TrainingExecutor::from_jobs(config.jobs)?;
        let resampler = config.resampling.build()?;
        let detector_template =
            (!config.disable_drift_detection).then(|| config.drift_detector.build());
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            header: None,
            members: Vec::new(),
            executor,
            resampler,
            detector_template,
            instances_seen: 0,
            vote_threshold: 0.0,
        })
    }

    /// Replaces the detector every member clones on creation and reset. Ignored when
    /// drift detection is disabled.
    pub fn with_change_detector(mut self, template: Box<dyn ChangeDetector>) -> Self {
        if !self.config.disable_drift_detection {
            self.detector_template = Some(template);
        }
        self
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    pub fn members(&self) -> &[ArteBaseLearner] {
        &self.members
    }

    pub fn is_initialized(&self) -> bool {
        !self.members.is_empty()
    }

    pub fn instances_seen(&self) -> u64 {
        self.instances_seen
    }

    /// Accuracy a member's window must reach to vote in the next round.
    pub fn vote_threshold(&self) -> f64 {
        self.vote_threshold
    }

    pub fn training_threads(&self) -> usize {
        self.executor.threads()
    }

    pub fn number_of_drifts(&self) -> u64 {
        self.members.iter().map(ArteBaseLearner::number_of_drifts).sum()
    }

    fn ensure_initialized(&mut self, instance: &dyn Instance) {
        if self.is_initialized() {
            return;
        }
        let header = self
            .header
            .clone()
            .unwrap_or_else(|| Arc::new(instance.header().clone()));
        let num_features = header.number_of_features();
        let mut subspace_rng = StdRng::seed_from_u64(
            self.config
                .seed
                .wrapping_add((num_features + header.number_of_classes()) as u64),
        );

        self.members = (0..self.config.ensemble_size)
            .map(|index| {
                let subspace_size = draw_subspace_size(
                    &mut subspace_rng,
                    self.config.min_subspace_size,
                    num_features,
                );
                ArteBaseLearner::new(
                    index,
                    self.config.tree.clone(),
                    subspace_size,
                    self.config.min_subspace_size,
                    num_features,
                    self.detector_template.as_ref().map(|d| d.clone_box()),
                    self.config.window_size,
                    self.instances_seen,
                )
            })
            .collect();
        self.header = Some(header);

        info!(
            members = self.members.len(),
            features = num_features,
            threads = self.executor.threads(),
            drift_detection = self.detector_template.is_some(),
            "initialised ensemble"
        );
    }

    fn member_eligible(&self, member: &ArteBaseLearner) -> bool {
        member
            .window_accuracy()
            .is_some_and(|accuracy| accuracy >= self.vote_threshold)
    }

    /// Gated vote without touching any state. An untrained ensemble votes zeros.
    pub fn votes(&self, instance: &dyn Instance) -> Vec<f64> {
        let mut combined = vec![0.0; instance.number_of_classes()];
        for member in &self.members {
            if !self.member_eligible(member) {
                continue;
            }
            let mut votes = member.votes(instance);
            if normalize(&mut votes) {
                add_values(&mut combined, &votes);
            }
        }
        combined
    }

    /// Gated vote that also records every member's outcome and then refreshes the
    /// threshold. Eligibility is decided before the outcome is recorded.
    fn votes_updating_accuracy(&mut self, instance: &dyn Instance) -> Vec<f64> {
        let mut combined = vec![0.0; instance.number_of_classes()];
        let threshold = self.vote_threshold;
        for member in &mut self.members {
            let mut votes = member.votes(instance);
            let eligible = member
                .window_accuracy()
                .is_some_and(|accuracy| accuracy >= threshold);
            member.record_outcome(instance, &votes);
            if eligible && normalize(&mut votes) {
                add_values(&mut combined, &votes);
            }
        }
        self.refresh_vote_threshold();
        combined
    }

    /// Mean windowed accuracy over all members (empty windows count as zero),
    /// optionally lowered by one population standard deviation. Kept unchanged while
    /// every window is empty or wrong.
    fn refresh_vote_threshold(&mut self) {
        if self.members.is_empty() {
            return;
        }
        let accuracies: Vec<f64> = self
            .members
            .iter()
            .map(|m| m.window_accuracy().unwrap_or(0.0))
            .collect();
        let sum: f64 = accuracies.iter().sum();
        if sum <= 0.0 {
            return;
        }
        let n = accuracies.len() as f64;
        let mean = sum / n;
        self.vote_threshold = match self.config.vote_threshold {
            VoteThreshold::Mean => mean,
            VoteThreshold::MeanMinusStdDev => {
                let variance = accuracies.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
                mean - variance.sqrt()
            }
        };
    }
}

impl Classifier for Arte {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        self.votes(instance)
    }

    fn test_on_instance(&mut self, instance: &dyn Instance) -> Vec<f64> {
        self.ensure_initialized(instance);
        match self.config.accuracy_update {
            AccuracyUpdate::OnPrediction => self.votes_updating_accuracy(instance),
            AccuracyUpdate::OnTraining => self.votes(instance),
        }
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.header = Some(header);
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<()> {
        self.instances_seen += 1;
        self.ensure_initialized(instance);

        if self.config.accuracy_update == AccuracyUpdate::OnTraining {
            self.votes_updating_accuracy(instance);
        }

        let instances_seen = self.instances_seen;
        let seed = self.config.seed;
        let mut weights = Vec::with_capacity(self.members.len());
        for member in &mut self.members {
            member.reseed(seed, instances_seen);
            let mut k = self.resampler.draw(&mut self.rng);
            if self.config.regularized_training && !member.accepts_for_regularized_training(instance)
            {
                k = 0.0;
            }
            weights.push(k);
        }

        let mut tasks: Vec<(usize, (&mut ArteBaseLearner, f64))> = self
            .members
            .iter_mut()
            .zip(weights)
            .filter(|(_, k)| *k > 0.0)
            .map(|(member, k)| (member.index(), (member, k)))
            .collect();

        self.executor.run_all(&mut tasks, |(member, k)| {
            member.train(instance, *k, instances_seen)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::hoeffding_tree::LeafPredictionOption;
    use crate::ensemble::resampling::Resampling;
    use crate::testing::{ScriptedChangeDetector, header_numeric, labelled};

    fn small_config(ensemble_size: usize) -> EnsembleConfig {
        let mut config = EnsembleConfig {
            ensemble_size,
            window_size: 10,
            resampling: Resampling::Constant { weight: 1.0 },
            disable_drift_detection: true,
            ..EnsembleConfig::default()
        };
        config.tree.grace_period = 20;
        config.tree.leaf_prediction = LeafPredictionOption::MajorityClass;
        config
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = EnsembleConfig {
            ensemble_size: 0,
            ..EnsembleConfig::default()
        };
        assert!(Arte::new(config).is_err());
    }

    #[test]
    fn untrained_ensemble_votes_zeros_without_initialising() {
        let header = header_numeric(3, 2);
        let arte = Arte::new(small_config(3)).unwrap();
        assert_eq!(arte.votes(&labelled(&header, &[0.0; 3], 0)), vec![0.0, 0.0]);
        assert!(!arte.is_initialized());
    }

    #[test]
    fn first_training_call_creates_members_with_subspaces() {
        let header = header_numeric(6, 2);
        let mut arte = Arte::new(small_config(8)).unwrap();
        arte.train_on_instance(&labelled(&header, &[0.5; 6], 1)).unwrap();

        assert_eq!(arte.members().len(), 8);
        assert_eq!(arte.instances_seen(), 1);
        for (i, m) in arte.members().iter().enumerate() {
            assert_eq!(m.index(), i);
            assert!((2..=6).contains(&m.subspace_size()));
            assert_eq!(m.tree().training_weight_seen(), 1.0);
        }
    }

    #[test]
    fn zero_weight_members_are_not_trained() {
        let header = header_numeric(2, 2);
        let mut config = small_config(4);
        config.resampling = Resampling::Constant { weight: 0.0 };
        let mut arte = Arte::new(config).unwrap();
        arte.train_on_instance(&labelled(&header, &[0.5, 0.5], 1)).unwrap();
        assert!(arte.members().iter().all(|m| !m.tree().is_trained()));
    }

    #[test]
    fn members_with_empty_windows_do_not_vote() {
        let header = header_numeric(2, 2);
        let mut arte = Arte::new(small_config(3)).unwrap();
        let inst = labelled(&header, &[0.5, 0.5], 1);
        arte.train_on_instance(&inst).unwrap();

        // windows are empty, so nobody is eligible on the first labelled prediction
        assert_eq!(arte.test_on_instance(&inst), vec![0.0, 0.0]);
        assert!(arte.members().iter().all(|m| m.window().fill_count() == 1));
        assert_eq!(arte.vote_threshold(), 1.0);

        // every member was right, so all of them reach the threshold now
        assert_eq!(arte.test_on_instance(&inst), vec![0.0, 3.0]);
        assert_eq!(arte.votes(&inst), vec![0.0, 3.0]);
    }

    #[test]
    fn threshold_ignores_rounds_where_every_window_is_wrong() {
        let header = header_numeric(2, 2);
        let mut arte = Arte::new(small_config(2)).unwrap();
        arte.train_on_instance(&labelled(&header, &[0.5, 0.5], 1)).unwrap();

        arte.test_on_instance(&labelled(&header, &[0.5, 0.5], 0));
        assert_eq!(arte.vote_threshold(), 0.0);

        arte.test_on_instance(&labelled(&header, &[0.5, 0.5], 1));
        assert_eq!(arte.vote_threshold(), 0.5);
    }

    #[test]
    fn mean_minus_std_dev_lowers_the_threshold() {
        let header = header_numeric(2, 2);
        let mut config = small_config(2);
        config.vote_threshold = VoteThreshold::MeanMinusStdDev;
        let mut arte = Arte::new(config).unwrap();
        arte.train_on_instance(&labelled(&header, &[0.5, 0.5], 1)).unwrap();
        arte.test_on_instance(&labelled(&header, &[0.5, 0.5], 1));
        // identical members: std dev is zero
        assert_eq!(arte.vote_threshold(), 1.0);
    }

    #[test]
    fn on_training_policy_keeps_prediction_pure() {
        let header = header_numeric(2, 2);
        let mut config = small_config(2);
        config.accuracy_update = AccuracyUpdate::OnTraining;
        let mut arte = Arte::new(config).unwrap();
        let inst = labelled(&header, &[0.5, 0.5], 1);

        arte.train_on_instance(&inst).unwrap();
        // the first step recorded the untrained members' outcome before training
        assert!(arte.members().iter().all(|m| m.window().fill_count() == 1));

        arte.test_on_instance(&inst);
        assert!(arte.members().iter().all(|m| m.window().fill_count() == 1));

        arte.train_on_instance(&inst).unwrap();
        assert!(arte.members().iter().all(|m| m.window().fill_count() == 2));
    }

    #[test]
    fn scripted_drift_resets_members() {
        let header = header_numeric(2, 2);
        let mut config = small_config(3);
        config.disable_drift_detection = false;
        let mut arte = Arte::new(config)
            .unwrap()
            .with_change_detector(Box::new(ScriptedChangeDetector::firing_on(vec![4])));
        let inst = labelled(&header, &[0.5, 0.5], 0);
        for _ in 0..4 {
            arte.train_on_instance(&inst).unwrap();
        }
        assert_eq!(arte.number_of_drifts(), 3);
        for m in arte.members() {
            assert_eq!(m.last_drift_on(), 4);
            assert_eq!(m.created_on(), 4);
            assert!(!m.tree().is_trained());
        }
    }

    #[test]
    fn regularized_training_skips_most_correct_instances() {
        let header = header_numeric(2, 2);
        let mut config = small_config(1);
        config.regularized_training = true;
        let mut arte = Arte::new(config).unwrap();
        let inst = labelled(&header, &[0.5, 0.5], 0);
        for _ in 0..11 {
            arte.train_on_instance(&inst).unwrap();
        }
        // the untrained tree already votes class 0 on ties, so only every fifth counts
        assert_eq!(arte.members()[0].tree().training_weight_seen(), 2.0);
    }
}
