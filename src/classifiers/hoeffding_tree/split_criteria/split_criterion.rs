/// Scores a candidate split from the class distribution before the split and the
/// per-branch distributions after it. Higher merit is better.
pub trait SplitCriterion: Send + Sync {
    fn get_merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>])
    -> f64;

    /// Width of the merit scale, the `R` in the Hoeffding bound.
    fn get_range_of_merit(&self, pre_split_distribution: &[f64]) -> f64;
}
