use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::error::{FilterError, Result};
use crate::signal_processing::mirror_buffer::MirrorBuffer;

/// Sliding single-bin DFT at a harmonic of the nominal line frequency.
///
/// The bin accumulator follows `Y <- e^{jw} * (Y + x_new - x_old)` over a
/// window of one nominal period, so each sample costs one complex
/// multiply-add regardless of the window length. Serves as a spectral probe
/// and as the reference for the recursive FIR realization.
pub struct RecursiveFourier {
    window_len: usize,
    rotator: Complex64,
    bin: Complex64,
    buffer: MirrorBuffer,
}

impl RecursiveFourier {
    /// Build a probe for the given harmonic of `nominal_freq` (1 is the
    /// fundamental), sliding over one nominal period of samples.
    pub fn new(sample_rate: f64, nominal_freq: f64, harmonic: u32) -> Result<Self> {
        if sample_rate <= 0.0 {
            return Err(FilterError::InvalidSampleRate(sample_rate));
        }
        if nominal_freq <= 0.0 {
            return Err(FilterError::InvalidNominalFrequency(nominal_freq));
        }
        let period = sample_rate / nominal_freq;
        let window_len = period.round() as usize;
        if window_len < 2 {
            return Err(FilterError::NominalPeriodTooShort { samples: period });
        }
        let omega = TAU * harmonic as f64 / window_len as f64;
        Ok(Self {
            window_len,
            rotator: Complex64::from_polar(1.0, omega),
            bin: Complex64::new(0.0, 0.0),
            buffer: MirrorBuffer::new(window_len)?,
        })
    }

    /// Advance the window by one sample and return the updated bin.
    pub fn process(&mut self, sample: f64) -> Complex64 {
        let leaving = self.buffer.oldest();
        self.buffer.push(sample);
        self.bin = self.rotator * (self.bin + sample - leaving);
        self.bin
    }

    /// Raw bin accumulator.
    pub fn bin(&self) -> Complex64 {
        self.bin
    }

    /// Complex amplitude estimate: the bin scaled by 2/N, so a unit-amplitude
    /// tone at the probed harmonic yields magnitude 1.
    pub fn phasor(&self) -> Complex64 {
        self.bin.scale(2.0 / self.window_len as f64)
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn reset(&mut self) {
        self.bin = Complex64::new(0.0, 0.0);
        self.buffer.reset();
    }
}
