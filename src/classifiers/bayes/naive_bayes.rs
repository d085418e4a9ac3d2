use crate::classifiers::attribute_class_observers::AttributeClassObserver;
use crate::core::instances::Instance;

/// Class-prior times per-feature likelihood, for every class in
/// `observed_class_distribution`. Features with no observer or a missing value are
/// skipped; an empty prior yields all-zero votes.
pub fn do_naive_bayes_prediction(
    instance: &dyn Instance,
    observed_class_distribution: &[f64],
    attribute_observers: &[Option<Box<dyn AttributeClassObserver>>],
) -> Vec<f64> {
    let mut votes = vec![0.0; observed_class_distribution.len()];
    let observed_class_sum: f64 = observed_class_distribution.iter().sum();
    if observed_class_sum <= 0.0 {
        return votes;
    }

    for (class_index, vote) in votes.iter_mut().enumerate() {
        let mut score = observed_class_distribution[class_index] / observed_class_sum;

        for (att_index, obs) in attribute_observers.iter().enumerate() {
            let Some(obs) = obs else { continue };
            let Some(x) = instance.feature_value(att_index).filter(|v| !v.is_nan()) else {
                continue;
            };
            score *= obs
                .probability_of_attribute_value_given_class(x, class_index)
                .unwrap_or(0.0);
        }
        *vote = score;
    }
    votes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::attribute_class_observers::{
        GaussianNumericAttributeClassObserver, NominalAttributeClassObserver, NumericSplitPoints,
    };
    use crate::core::class_distribution::max_index;
    use crate::core::instances::DenseInstance;
    use crate::testing::{header_mixed, header_numeric};

    fn numeric_observer() -> Box<dyn AttributeClassObserver> {
        Box::new(GaussianNumericAttributeClassObserver::new(
            NumericSplitPoints::Randomized,
        ))
    }

    #[test]
    fn empty_prior_gives_zero_votes() {
        let header = header_numeric(1, 2);
        let inst = DenseInstance::new(header, vec![0.3, 0.0], 1.0);
        assert_eq!(do_naive_bayes_prediction(&inst, &[0.0, 0.0], &[None]), vec![0.0, 0.0]);
    }

    #[test]
    fn likelihood_moves_prediction_away_from_the_prior() {
        let header = header_numeric(1, 2);
        let mut obs = numeric_observer();
        for i in 0..30 {
            obs.observe_attribute_class(i as f64 * 0.01, 0, 1.0);
        }
        for i in 0..10 {
            obs.observe_attribute_class(1.0 + i as f64 * 0.01, 1, 1.0);
        }
        let observers = vec![Some(obs)];
        let prior = [30.0, 10.0];

        let near_one = DenseInstance::new(header.clone(), vec![1.05, 0.0], 1.0);
        let near_zero = DenseInstance::new(header, vec![0.1, 0.0], 1.0);
        assert_eq!(
            max_index(&do_naive_bayes_prediction(&near_one, &prior, &observers)),
            Some(1)
        );
        assert_eq!(
            max_index(&do_naive_bayes_prediction(&near_zero, &prior, &observers)),
            Some(0)
        );
    }

    #[test]
    fn missing_and_unobserved_features_are_skipped() {
        let header = header_mixed();
        let mut colour = NominalAttributeClassObserver::new();
        colour.observe_attribute_class(0.0, 0, 5.0);
        colour.observe_attribute_class(2.0, 1, 5.0);
        let observers: Vec<Option<Box<dyn AttributeClassObserver>>> =
            vec![None, Some(Box::new(colour))];

        let missing = DenseInstance::new(header.clone(), vec![0.5, f64::NAN, 0.0], 1.0);
        assert_eq!(
            do_naive_bayes_prediction(&missing, &[3.0, 1.0], &observers),
            vec![0.75, 0.25]
        );

        let blue = DenseInstance::new(header, vec![0.5, 2.0, 0.0], 1.0);
        let votes = do_naive_bayes_prediction(&blue, &[1.0, 1.0], &observers);
        assert!(votes[1] > votes[0]);
    }
}
