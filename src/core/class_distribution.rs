use std::ops::Index;

/// Weight accumulated per class index. Grows on demand when a new class shows up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassDistribution {
    weights: Vec<f64>,
}

impl ClassDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_weights(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn add_to_value(&mut self, class_index: usize, weight: f64) {
        if class_index >= self.weights.len() {
            self.weights.resize(class_index + 1, 0.0);
        }
        self.weights[class_index] += weight;
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Index of the heaviest class, first one on ties. `None` when nothing was observed.
    pub fn max_index(&self) -> Option<usize> {
        max_index(&self.weights)
    }

    pub fn num_non_zero_entries(&self) -> usize {
        self.weights.iter().filter(|&&w| w != 0.0).count()
    }

    pub fn is_pure(&self) -> bool {
        self.num_non_zero_entries() < 2
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, class_index: usize) -> f64 {
        self.weights.get(class_index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.weights.clone()
    }
}

impl Index<usize> for ClassDistribution {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.weights[index]
    }
}

impl From<Vec<f64>> for ClassDistribution {
    fn from(weights: Vec<f64>) -> Self {
        Self::from_weights(weights)
    }
}

pub fn max_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, best_v)) if v <= best_v => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Scales `values` in place so they sum to one. Leaves all-zero vectors untouched.
pub fn normalize(values: &mut [f64]) -> bool {
    let sum: f64 = values.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return false;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
    true
}

/// Element-wise `dst += src`, growing `dst` if `src` is longer.
pub fn add_values(dst: &mut Vec<f64>, src: &[f64]) {
    if src.len() > dst.len() {
        dst.resize(src.len(), 0.0);
    }
    for (d, s) in dst.iter_mut().zip(src) {
        *d += *s;
    }
}
