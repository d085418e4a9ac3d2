pub mod attribute_split_suggestion;

pub use attribute_split_suggestion::{AttributeSplitSuggestion, sort_by_merit};
