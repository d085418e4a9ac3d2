use crate::utils::math::normal_probability;

/// Running weighted mean/variance of one attribute for one class (Welford update).
#[derive(Clone, Debug, Default)]
pub struct GaussianEstimator {
    weight_sum: f64,
    mean: f64,
    variance_sum: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_observation(&mut self, value: f64, weight: f64) {
        if !value.is_finite() {
            return;
        }

        if self.weight_sum > 0.0 {
            self.weight_sum += weight;
            let last_mean = self.mean;
            self.mean += weight * (value - last_mean) / self.weight_sum;
            self.variance_sum += weight * (value - last_mean) * (value - self.mean);
        } else {
            self.mean = value;
            self.weight_sum = weight;
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        if self.weight_sum > 1.0 {
            self.variance_sum / (self.weight_sum - 1.0)
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn total_weight_observed(&self) -> f64 {
        self.weight_sum
    }

    /// Estimated weight strictly below, at and strictly above `value`.
    pub fn estimated_weight_less_equal_greater_value(&self, value: f64) -> [f64; 3] {
        let equal_weight = self.probability_density(value) * self.weight_sum;
        let std_dev = self.std_dev();
        let less_weight = if std_dev > 0.0 {
            let z = (value - self.mean) / std_dev;
            normal_probability(z) * self.weight_sum - equal_weight
        } else if value < self.mean {
            self.weight_sum - equal_weight
        } else {
            0.0
        };

        let greater_weight = (self.weight_sum - equal_weight - less_weight).max(0.0);
        [less_weight, equal_weight, greater_weight]
    }

    pub fn probability_density(&self, value: f64) -> f64 {
        if self.weight_sum <= 0.0 {
            return 0.0;
        }
        let std_dev = self.std_dev();
        if std_dev > 0.0 {
            let normal_const = (2.0 * std::f64::consts::PI).sqrt();
            let diff = value - self.mean;
            return (1.0 / (normal_const * std_dev))
                * ((-diff * diff) / (2.0 * std_dev * std_dev)).exp();
        }
        if value == self.mean { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::GaussianEstimator;
    use approx::assert_abs_diff_eq;

    #[test]
    fn starts_empty() {
        let g = GaussianEstimator::new();
        assert_eq!(g.variance(), 0.0);
        assert_eq!(g.probability_density(0.0), 0.0);
        assert_eq!(g.total_weight_observed(), 0.0);
    }

    #[test]
    fn three_observations_variance_known() {
        let mut g = GaussianEstimator::new();
        g.add_observation(-1.0, 1.0);
        g.add_observation(0.0, 1.0);
        g.add_observation(1.0, 1.0);

        assert_abs_diff_eq!(g.mean(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.variance(), 1.0, epsilon = 1e-12);
        let expected = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
        assert_abs_diff_eq!(g.probability_density(0.0), expected, epsilon = 1e-9);
    }

    #[test]
    fn weighted_data_behaves_like_repetition() {
        let mut weighted = GaussianEstimator::new();
        weighted.add_observation(0.0, 2.0);
        weighted.add_observation(2.0, 1.0);

        let mut repeated = GaussianEstimator::new();
        repeated.add_observation(0.0, 1.0);
        repeated.add_observation(0.0, 1.0);
        repeated.add_observation(2.0, 1.0);

        assert_abs_diff_eq!(weighted.mean(), repeated.mean(), epsilon = 1e-12);
        assert_abs_diff_eq!(weighted.variance(), repeated.variance(), epsilon = 1e-12);
    }

    #[test]
    fn ignores_non_finite_values() {
        let mut g = GaussianEstimator::new();
        g.add_observation(f64::NAN, 1.0);
        g.add_observation(f64::INFINITY, 1.0);
        assert_eq!(g.total_weight_observed(), 0.0);
    }

    #[test]
    fn less_equal_greater_partitions_total_weight() {
        let mut g = GaussianEstimator::new();
        for (i, v) in [1.0, 2.0, 2.5, 3.0, 4.0, 7.0].iter().enumerate() {
            g.add_observation(*v, 1.0 + i as f64 * 0.5);
        }
        for split in [0.0, 1.5, 2.75, 3.3, 10.0] {
            let [less, equal, greater] = g.estimated_weight_less_equal_greater_value(split);
            assert_abs_diff_eq!(
                less + equal + greater,
                g.total_weight_observed(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn zero_variance_puts_mass_on_one_side() {
        let mut g = GaussianEstimator::new();
        g.add_observation(5.0, 3.0);

        assert_eq!(g.estimated_weight_less_equal_greater_value(4.0), [0.0, 0.0, 3.0]);
        assert_eq!(g.estimated_weight_less_equal_greater_value(6.0), [3.0, 0.0, 0.0]);
    }
}
