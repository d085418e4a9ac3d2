use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::{ArteError, Result};
use crate::streams::stream::Stream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mixes two streams with a sigmoid: instance `t` comes from the drifted stream with
/// probability `1 / (1 + e^(-4 (t - position) / width))`. A width of 1 is an abrupt
/// switch at `position`.
pub struct ConceptDriftStream {
    initial: Box<dyn Stream>,
    drifted: Box<dyn Stream>,
    position: u64,
    width: u64,
    seed: u64,
    rng: StdRng,
    produced: u64,
}

impl ConceptDriftStream {
    pub fn new(
        initial: Box<dyn Stream>,
        drifted: Box<dyn Stream>,
        position: u64,
        width: u64,
        seed: u64,
    ) -> Result<Self> {
        if width == 0 {
            return Err(ArteError::invalid("width", "must be at least 1"));
        }
        if initial.header().number_of_attributes() != drifted.header().number_of_attributes()
            || initial.header().class_index() != drifted.header().class_index()
        {
            return Err(ArteError::invalid(
                "drift",
                "both streams must share the same attribute layout",
            ));
        }
        Ok(Self {
            initial,
            drifted,
            position,
            width,
            seed,
            rng: StdRng::seed_from_u64(seed),
            produced: 0,
        })
    }

    pub fn drift_probability(&self, t: u64) -> f64 {
        let x = -4.0 * (t as f64 - self.position as f64) / self.width as f64;
        1.0 / (1.0 + x.exp())
    }
}

impl Stream for ConceptDriftStream {
    fn header(&self) -> &InstanceHeader {
        self.initial.header()
    }

    fn has_more_instances(&self) -> bool {
        self.initial.has_more_instances() && self.drifted.has_more_instances()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        self.produced += 1;
        let p = self.drift_probability(self.produced);
        if self.rng.random::<f64>() > p {
            self.initial.next_instance()
        } else {
            self.drifted.next_instance()
        }
    }

    fn restart(&mut self) -> Result<()> {
        self.initial.restart()?;
        self.drifted.restart()?;
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        Ok(())
    }
}
