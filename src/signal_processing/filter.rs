/// Common trait for single-sample streaming filters
///
/// Implemented by FirFilter, EfficientFir and AperiodicFilter. Outputs are
/// produced in one-to-one lockstep with inputs.
pub trait SampleFilter {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f64) -> f64;

    /// Process a buffer of samples in-place
    fn process_block(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
