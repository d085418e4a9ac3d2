use crate::drift::change_detector::ChangeDetector;
use std::collections::VecDeque;

const MAX_BUCKETS: usize = 5;
const CLOCK: u64 = 32;
const MIN_WINDOW_LENGTH: usize = 10;
const MIN_SUB_WINDOW_LENGTH: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    total: f64,
    variance: f64,
}

/// ADaptive WINdowing (Bifet & Gavaldà, 2007).
///
/// Keeps an exponential histogram of the stream: row `i` holds up to `MAX_BUCKETS`
/// buckets of `2^i` elements each, oldest first. Every `CLOCK` inputs the window is
/// scanned for a cut point whose two sides have significantly different means, and
/// the oldest buckets are dropped until no such cut remains.
///
/// As a [`ChangeDetector`] it only reports a change when shrinking the window raised
/// the estimate, i.e. when the monitored error got worse.
#[derive(Debug, Clone)]
pub struct Adwin {
    delta: f64,
    rows: Vec<VecDeque<Bucket>>,
    total: f64,
    variance: f64,
    width: usize,
    time: u64,
    change: bool,
}

impl Adwin {
    pub fn new(delta: f64) -> Self {
        Self {
            delta,
            rows: Vec::new(),
            total: 0.0,
            variance: 0.0,
            width: 0,
            time: 0,
            change: false,
        }
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mean(&self) -> f64 {
        if self.width > 0 {
            self.total / self.width as f64
        } else {
            0.0
        }
    }

    fn bucket_size(row: usize) -> f64 {
        (1u64 << row) as f64
    }

    /// Adds `value` and returns whether the window was cut.
    pub fn add_element(&mut self, value: f64) -> bool {
        self.width += 1;
        if self.rows.is_empty() {
            self.rows.push(VecDeque::new());
        }
        self.rows[0].push_back(Bucket {
            total: value,
            variance: 0.0,
        });

        if self.width > 1 {
            let w = self.width as f64;
            self.variance += (w - 1.0) * (value - self.total / (w - 1.0)).powi(2) / w;
        }
        self.total += value;

        self.compress_buckets();
        self.check_drift()
    }

    fn compress_buckets(&mut self) {
        let mut row = 0;
        while row < self.rows.len() && self.rows[row].len() > MAX_BUCKETS {
            if row + 1 == self.rows.len() {
                self.rows.push(VecDeque::new());
            }
            let (Some(b0), Some(b1)) = (self.rows[row].pop_front(), self.rows[row].pop_front())
            else {
                break;
            };
            let n = Self::bucket_size(row);
            let (u0, u1) = (b0.total / n, b1.total / n);
            let inc_variance = n * n * (u0 - u1).powi(2) / (n + n);
            self.rows[row + 1].push_back(Bucket {
                total: b0.total + b1.total,
                variance: b0.variance + b1.variance + inc_variance,
            });
            row += 1;
        }
    }

    fn check_drift(&mut self) -> bool {
        self.time += 1;
        if self.time % CLOCK != 0 || self.width <= MIN_WINDOW_LENGTH {
            return false;
        }

        let mut change = false;
        let mut reduce_width = true;
        while reduce_width {
            reduce_width = false;
            let mut n0 = 0.0;
            let mut n1 = self.width as f64;
            let mut u0 = 0.0;
            let mut u1 = self.total;

            'scan: for row in (0..self.rows.len()).rev() {
                let size = Self::bucket_size(row);
                let len = self.rows[row].len();
                for k in 0..len {
                    let bucket_total = self.rows[row][k].total;
                    n0 += size;
                    n1 -= size;
                    u0 += bucket_total;
                    u1 -= bucket_total;

                    if row == 0 && k == len - 1 {
                        break 'scan;
                    }
                    if Self::sub_window_long_enough(n0)
                        && Self::sub_window_long_enough(n1)
                        && self.cut_expression(n0, n1, u0 / n0 - u1 / n1)
                    {
                        reduce_width = true;
                        change = true;
                        self.delete_element();
                        break 'scan;
                    }
                }
            }
        }
        change
    }

    fn sub_window_long_enough(n: f64) -> bool {
        n > MIN_SUB_WINDOW_LENGTH + 1.0
    }

    fn cut_expression(&self, n0: f64, n1: f64, abs_value: f64) -> bool {
        let n = self.width as f64;
        let dd = (2.0 * n.ln() / self.delta).ln();
        let v = self.variance / n;
        let m = 1.0 / (n0 - MIN_SUB_WINDOW_LENGTH + 1.0) + 1.0 / (n1 - MIN_SUB_WINDOW_LENGTH + 1.0);
        let epsilon = (2.0 * m * v * dd).sqrt() + 2.0 / 3.0 * dd * m;
        abs_value.abs() > epsilon
    }

    /// Drops the oldest bucket.
    fn delete_element(&mut self) {
        let Some(last) = self.rows.len().checked_sub(1) else {
            return;
        };
        let Some(bucket) = self.rows[last].pop_front() else {
            return;
        };
        let n = Self::bucket_size(last);
        self.width = self.width.saturating_sub(n as usize);
        self.total -= bucket.total;

        if self.width == 0 {
            self.total = 0.0;
            self.variance = 0.0;
        } else {
            let w = self.width as f64;
            let u = bucket.total / n;
            self.variance -= bucket.variance + n * w * (u - self.total / w).powi(2) / (n + w);
        }

        if self.rows[last].is_empty() {
            self.rows.pop();
        }
    }
}

impl ChangeDetector for Adwin {
    fn input(&mut self, value: f64) {
        let before = self.mean();
        self.change = self.add_element(value) && self.mean() > before;
    }

    fn detected_change(&self) -> bool {
        self.change
    }

    fn estimation(&self) -> f64 {
        self.mean()
    }

    fn clone_box(&self) -> Box<dyn ChangeDetector> {
        Box::new(Adwin::new(self.delta))
    }
}
