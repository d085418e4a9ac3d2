use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::{ArteError, Result};
use crate::streams::stream::Stream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Thresholds of the four SEA concepts.
const THRESHOLDS: [f64; 4] = [8.0, 9.0, 7.0, 9.5];

/// SEA concepts (Street & Kim, 2001): three numeric attributes uniform in `[0, 10)`,
/// class `group-a` when `x1 + x2 <= θ`, `group-b` otherwise. The third attribute is
/// irrelevant.
#[derive(Debug)]
pub struct SeaGenerator {
    header: Arc<InstanceHeader>,
    function_id: u8,
    balance: bool,
    noise: f64,
    max_instances: Option<u64>,
    seed: u64,
    rng: StdRng,
    produced: u64,
    next_class_should_be_zero: bool,
}

impl SeaGenerator {
    /// `function_id` in `1..=4`, `noise` is the probability of flipping a label.
    pub fn new(
        function_id: u8,
        balance: bool,
        noise: f64,
        max_instances: Option<u64>,
        seed: u64,
    ) -> Result<Self> {
        if !(1..=4).contains(&function_id) {
            return Err(ArteError::invalid(
                "function_id",
                format!("SEA defines functions 1 to 4, got {function_id}"),
            ));
        }
        if !(0.0..=1.0).contains(&noise) {
            return Err(ArteError::invalid(
                "noise",
                format!("must lie in [0, 1], got {noise}"),
            ));
        }

        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("attrib1".into())),
            Arc::new(NumericAttribute::new("attrib2".into())),
            Arc::new(NumericAttribute::new("attrib3".into())),
            Arc::new(NominalAttribute::with_values(
                "class".into(),
                vec!["group-a".into(), "group-b".into()],
            )),
        ];
        Ok(Self {
            header: Arc::new(InstanceHeader::new(
                "SEA".into(),
                attributes,
                3,
            )),
            function_id,
            balance,
            noise,
            max_instances,
            seed,
            rng: StdRng::seed_from_u64(seed),
            produced: 0,
            next_class_should_be_zero: false,
        })
    }

    fn determine_class(&self, x1: f64, x2: f64) -> usize {
        let threshold = THRESHOLDS[usize::from(self.function_id - 1)];
        usize::from(x1 + x2 > threshold)
    }
}

impl Stream for SeaGenerator {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.max_instances.is_none_or(|max| self.produced < max)
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        if !self.has_more_instances() {
            return None;
        }

        let (x1, x2, x3, mut class) = loop {
            let x1 = self.rng.random::<f64>() * 10.0;
            let x2 = self.rng.random::<f64>() * 10.0;
            let x3 = self.rng.random::<f64>() * 10.0;
            let class = self.determine_class(x1, x2);
            if !self.balance {
                break (x1, x2, x3, class);
            }
            if (class == 0) == self.next_class_should_be_zero {
                self.next_class_should_be_zero = !self.next_class_should_be_zero;
                break (x1, x2, x3, class);
            }
        };
        if self.noise > 0.0 && self.rng.random_bool(self.noise) {
            class = 1 - class;
        }

        self.produced += 1;
        Some(Box::new(DenseInstance::new(
            Arc::clone(&self.header),
            vec![x1, x2, x3, class as f64],
            1.0,
        )))
    }

    fn restart(&mut self) -> Result<()> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        self.next_class_should_be_zero = false;
        Ok(())
    }
}
