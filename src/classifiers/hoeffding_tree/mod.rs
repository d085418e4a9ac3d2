pub mod hoeffding_tree;
pub mod hoeffding_tree_config;
pub mod instance_conditional_test;
pub mod leaf_prediction_option;
pub mod nodes;
pub mod split_criteria;

pub use hoeffding_tree::{HoeffdingTree, compute_hoeffding_bound};
pub use hoeffding_tree_config::HoeffdingTreeConfig;
pub use leaf_prediction_option::LeafPredictionOption;
