use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::error::{FilterError, Result};
use crate::signal_processing::filter::SampleFilter;
use crate::signal_processing::fir::FrequencyResponse;
use crate::signal_processing::mirror_buffer::MirrorBuffer;

/// Aperiodic-and-second-harmonic rejection filter.
///
/// A half-period comb y = 0.5·(x[k] − x[k − N/2]) where N is the nominal
/// period in samples. Its transfer function 0.5·(1 − z^{-N/2}) has exact
/// nulls at DC and at every even harmonic of the nominal frequency, so both
/// the decaying aperiodic offset of a faulted signal and its second
/// harmonic are cancelled, while the fundamental passes at unit gain.
pub struct AperiodicFilter {
    sample_rate: f64,
    nominal_freq: f64,
    order: usize,
    buffer: MirrorBuffer,
}

impl AperiodicFilter {
    /// Build the filter for the given rates; the comb length is half a
    /// nominal period, rounded to whole samples.
    pub fn new(sample_rate: f64, nominal_freq: f64) -> Result<Self> {
        if sample_rate <= 0.0 {
            return Err(FilterError::InvalidSampleRate(sample_rate));
        }
        if nominal_freq <= 0.0 {
            return Err(FilterError::InvalidNominalFrequency(nominal_freq));
        }
        let half_period = sample_rate / nominal_freq / 2.0;
        let order = half_period.round() as usize;
        if order < 1 {
            return Err(FilterError::NominalPeriodTooShort {
                samples: half_period,
            });
        }
        Ok(Self {
            sample_rate,
            nominal_freq,
            order,
            buffer: MirrorBuffer::new(order + 1)?,
        })
    }

    /// Comb length in samples (half a nominal period).
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn nominal_freq(&self) -> f64 {
        self.nominal_freq
    }

    /// Transfer function 0.5·(1 − e^{-j·2π·(N/2)·F·Ts}) at the probe
    /// frequency in Hz.
    pub fn frequency_response(&self, freq: f64) -> FrequencyResponse {
        let angle = -TAU * self.order as f64 * freq / self.sample_rate;
        let value = (Complex64::new(1.0, 0.0) - Complex64::from_polar(1.0, angle)).scale(0.5);
        FrequencyResponse { value }
    }

    pub fn reset(&mut self) {
        self.buffer.reset();
    }
}

impl SampleFilter for AperiodicFilter {
    fn process(&mut self, sample: f64) -> f64 {
        self.buffer.push(sample);
        let window = self.buffer.window();
        0.5 * (window[0] - window[self.order])
    }
}
