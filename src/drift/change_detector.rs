/// Online change detector fed one loss value per step (`0.0` correct, `1.0` wrong).
pub trait ChangeDetector: Send {
    fn input(&mut self, value: f64);

    /// Whether the last `input` triggered a change.
    fn detected_change(&self) -> bool;

    /// Current estimate of the monitored mean.
    fn estimation(&self) -> f64;

    /// Fresh detector with the same configuration.
    fn clone_box(&self) -> Box<dyn ChangeDetector>;
}
