use crate::core::class_distribution::max_index;
use crate::core::instances::Instance;
use crate::evaluation::measurement::Measurement;

pub trait PerformanceEvaluator: Send {
    fn add_result(&mut self, instance: &dyn Instance, votes: &[f64]);

    fn performance(&self) -> Vec<Measurement>;

    fn reset(&mut self);
}

/// Weighted accuracy plus Cohen's kappa, temporal kappa (against a no-change
/// predictor) and kappa-M (against a majority-class predictor), over everything seen.
#[derive(Clone, Debug)]
pub struct BasicClassificationEvaluator {
    num_classes: usize,
    weight_observed: f64,
    weight_correct: f64,
    true_class_weight: Vec<f64>,
    predicted_class_weight: Vec<f64>,
    weight_correct_no_change: f64,
    weight_correct_majority: f64,
    last_seen_class: usize,
}

impl BasicClassificationEvaluator {
    pub fn new(num_classes: usize) -> Self {
        Self {
            num_classes,
            weight_observed: 0.0,
            weight_correct: 0.0,
            true_class_weight: vec![0.0; num_classes],
            predicted_class_weight: vec![0.0; num_classes],
            weight_correct_no_change: 0.0,
            weight_correct_majority: 0.0,
            last_seen_class: 0,
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.weight_observed > 0.0 {
            self.weight_correct / self.weight_observed
        } else {
            f64::NAN
        }
    }

    pub fn kappa(&self) -> f64 {
        if self.weight_observed <= 0.0 {
            return 0.0;
        }
        let p0 = self.accuracy();
        let pc: f64 = self
            .true_class_weight
            .iter()
            .zip(&self.predicted_class_weight)
            .map(|(t, p)| (t / self.weight_observed) * (p / self.weight_observed))
            .sum();
        Self::relative_to(p0, pc)
    }

    pub fn kappa_temporal(&self) -> f64 {
        if self.weight_observed <= 0.0 {
            return 0.0;
        }
        Self::relative_to(
            self.accuracy(),
            self.weight_correct_no_change / self.weight_observed,
        )
    }

    pub fn kappa_majority(&self) -> f64 {
        if self.weight_observed <= 0.0 {
            return 0.0;
        }
        Self::relative_to(
            self.accuracy(),
            self.weight_correct_majority / self.weight_observed,
        )
    }

    fn relative_to(p0: f64, baseline: f64) -> f64 {
        if baseline >= 1.0 {
            0.0
        } else {
            (p0 - baseline) / (1.0 - baseline)
        }
    }

    fn grow(&mut self, class: usize) {
        if class >= self.num_classes {
            self.num_classes = class + 1;
            self.true_class_weight.resize(self.num_classes, 0.0);
            self.predicted_class_weight.resize(self.num_classes, 0.0);
        }
    }
}

impl PerformanceEvaluator for BasicClassificationEvaluator {
    fn add_result(&mut self, instance: &dyn Instance, votes: &[f64]) {
        let weight = instance.weight();
        let Some(true_class) = instance.class_value().map(|c| c as usize) else {
            return;
        };
        if weight <= 0.0 {
            return;
        }
        let predicted = max_index(votes).unwrap_or(0);
        self.grow(true_class.max(predicted));

        if self.weight_observed > 0.0 {
            let majority = max_index(&self.true_class_weight).unwrap_or(0);
            if majority == true_class {
                self.weight_correct_majority += weight;
            }
            if self.last_seen_class == true_class {
                self.weight_correct_no_change += weight;
            }
        }

        self.weight_observed += weight;
        if predicted == true_class {
            self.weight_correct += weight;
        }
        self.true_class_weight[true_class] += weight;
        self.predicted_class_weight[predicted] += weight;
        self.last_seen_class = true_class;
    }

    fn performance(&self) -> Vec<Measurement> {
        vec![
            Measurement::new("accuracy", self.accuracy()),
            Measurement::new("kappa", self.kappa()),
            Measurement::new("kappa_t", self.kappa_temporal()),
            Measurement::new("kappa_m", self.kappa_majority()),
        ]
    }

    fn reset(&mut self) {
        *self = Self::new(self.num_classes);
    }
}
