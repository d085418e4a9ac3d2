use std::sync::Arc;

pub type AttributeRef = Arc<dyn Attribute + Send + Sync>;

/// Feature metadata consumed by the learners: only the kind of the attribute and,
/// for nominal attributes, the size of its value domain matter to them.
pub trait Attribute: Send + Sync {
    fn name(&self) -> &str;

    fn is_nominal(&self) -> bool;

    /// Number of distinct values for nominal attributes, `0` for numeric ones.
    fn number_of_values(&self) -> usize;
}
