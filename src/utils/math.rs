use std::f64::consts::SQRT_2;

/// Standard normal cumulative distribution function.
pub fn normal_probability(z: f64) -> f64 {
    0.5 * libm::erfc(-z / SQRT_2)
}

/// Shannon entropy (base 2) of an unnormalized distribution.
pub fn entropy(distribution: &[f64]) -> f64 {
    let total: f64 = distribution.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let mut entropy = 0.0;
    for &d in distribution {
        if d > 0.0 {
            entropy -= d * d.log2();
        }
    }
    entropy / total + total.log2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normal_probability_known_points() {
        assert_abs_diff_eq!(normal_probability(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normal_probability(1.96), 0.975, epsilon = 1e-3);
        assert_abs_diff_eq!(normal_probability(-1.96), 0.025, epsilon = 1e-3);
    }

    #[test]
    fn entropy_of_balanced_and_pure() {
        assert_abs_diff_eq!(entropy(&[5.0, 5.0]), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(entropy(&[7.0, 0.0]), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(entropy(&[1.0, 1.0, 1.0, 1.0]), 2.0, epsilon = 1e-12);
        assert_eq!(entropy(&[]), 0.0);
    }
}
