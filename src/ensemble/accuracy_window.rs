use crate::error::{ArteError, Result};

/// Fixed-size circular record of the most recent prediction outcomes.
#[derive(Clone, Debug)]
pub struct AccuracyWindow {
    slots: Vec<bool>,
    cursor: usize,
    fill: usize,
    correct: usize,
}

impl AccuracyWindow {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ArteError::invalid("window_size", "must be at least 1"));
        }
        Ok(Self::with_validated_capacity(capacity))
    }

    /// `capacity` must already be checked to be at least 1.
    pub(crate) fn with_validated_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![false; capacity],
            cursor: 0,
            fill: 0,
            correct: 0,
        }
    }

    pub fn record(&mut self, correct: bool) {
        if self.fill == self.slots.len() && self.slots[self.cursor] {
            self.correct -= 1;
        }
        self.slots[self.cursor] = correct;
        if correct {
            self.correct += 1;
        }
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.fill = (self.fill + 1).min(self.slots.len());
    }

    /// Share of correct outcomes in the window, `None` before the first record.
    pub fn current_accuracy(&self) -> Option<f64> {
        (self.fill > 0).then(|| self.correct as f64 / self.fill as f64)
    }

    pub fn clear(&mut self) {
        self.slots.fill(false);
        self.cursor = 0;
        self.fill = 0;
        self.correct = 0;
    }

    pub fn fill_count(&self) -> usize {
        self.fill
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        let err = AccuracyWindow::new(0).unwrap_err();
        assert!(matches!(
            err,
            ArteError::InvalidParameter {
                name: "window_size",
                ..
            }
        ));
    }

    #[test]
    fn empty_window_has_no_accuracy() {
        let window = AccuracyWindow::new(4).unwrap();
        assert_eq!(window.current_accuracy(), None);
        assert_eq!(window.fill_count(), 0);
        assert_eq!(window.capacity(), 4);
    }

    #[test]
    fn partial_fill_divides_by_fill_count() {
        let mut window = AccuracyWindow::new(4).unwrap();
        window.record(true);
        window.record(false);
        window.record(true);
        assert_eq!(window.fill_count(), 3);
        assert_eq!(window.current_accuracy(), Some(2.0 / 3.0));
    }

    #[test]
    fn overwrites_oldest_outcome_once_full() {
        let mut window = AccuracyWindow::new(3).unwrap();
        for outcome in [true, true, true] {
            window.record(outcome);
        }
        assert_eq!(window.current_accuracy(), Some(1.0));

        window.record(false);
        assert_eq!(window.fill_count(), 3);
        assert_eq!(window.current_accuracy(), Some(2.0 / 3.0));

        window.record(false);
        window.record(false);
        assert_eq!(window.current_accuracy(), Some(0.0));

        window.record(true);
        assert_eq!(window.current_accuracy(), Some(1.0 / 3.0));
    }

    #[test]
    fn running_sum_matches_a_recount_after_many_wraps() {
        let mut window = AccuracyWindow::new(7).unwrap();
        let mut history = Vec::new();
        for i in 0..100u32 {
            let outcome = i % 3 == 0 || i % 5 == 0;
            window.record(outcome);
            history.push(outcome);
        }
        let recount = history.iter().rev().take(7).filter(|c| **c).count();
        assert_eq!(window.current_accuracy(), Some(recount as f64 / 7.0));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut window = AccuracyWindow::new(2).unwrap();
        window.record(true);
        window.record(true);
        window.clear();
        assert_eq!(window.current_accuracy(), None);
        window.record(false);
        assert_eq!(window.current_accuracy(), Some(0.0));
    }
}
