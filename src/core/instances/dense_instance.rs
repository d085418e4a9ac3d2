use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct DenseInstance {
    header: Arc<InstanceHeader>,
    values: Vec<f64>,
    weight: f64,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>, weight: f64) -> Self {
        Self {
            header,
            values,
            weight,
        }
    }

    /// Copy of this instance carrying `weight` instead of the original weight.
    pub fn with_weight(&self, weight: f64) -> Self {
        Self {
            header: Arc::clone(&self.header),
            values: self.values.clone(),
            weight,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::header_numeric;

    #[test]
    fn class_value_and_features_follow_class_index() {
        let header = header_numeric(2, 2);
        let inst = DenseInstance::new(header, vec![0.25, 0.75, 1.0], 2.0);

        assert_eq!(inst.class_index(), 2);
        assert_eq!(inst.class_value(), Some(1.0));
        assert_eq!(inst.feature_value(0), Some(0.25));
        assert_eq!(inst.feature_value(1), Some(0.75));
        assert_eq!(inst.number_of_classes(), 2);
        assert_eq!(inst.weight(), 2.0);
    }

    #[test]
    fn nan_is_missing() {
        let header = header_numeric(2, 2);
        let inst = DenseInstance::new(header, vec![f64::NAN, 0.5, f64::NAN], 1.0);

        assert!(inst.is_missing_at_index(0));
        assert!(!inst.is_missing_at_index(1));
        assert!(inst.is_missing_at_index(9));
        assert_eq!(inst.class_value(), None);
    }

    #[test]
    fn with_weight_keeps_values() {
        let header = header_numeric(1, 2);
        let inst = DenseInstance::new(header, vec![3.0, 0.0], 1.0);
        let heavy = inst.with_weight(6.0);

        assert_eq!(heavy.weight(), 6.0);
        assert_eq!(heavy.values(), inst.values());
        assert_eq!(inst.weight(), 1.0);
    }
}
