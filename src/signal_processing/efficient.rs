//! Recursive realization of an FIR filter.
//!
//! Any tap set of length L decomposes over the frequency-sampling structure
//! H(z) = (1 - z^-L)/L · Σₘ Cₘ / (1 - e^{j2πm/L}·z^-1), where Cₘ is the DFT
//! of the taps. The comb factor becomes the difference between the incoming
//! sample and the one leaving the window; each retained bin is a one-pole
//! complex resonator. Bins whose spectral weight is negligible are pruned,
//! so a one-period quadrature or Hartley tap set runs on a single complex
//! pole and the per-sample cost no longer depends on the order.

use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::constants::POLE_PRUNE_EPSILON;
use crate::error::{FilterError, Result};
use crate::signal_processing::filter::SampleFilter;
use crate::signal_processing::fir::FirFilter;
use crate::signal_processing::mirror_buffer::MirrorBuffer;

struct Pole {
    num: Complex64,
    den: Complex64,
    acc: Complex64,
}

/// Constant-cost recursive runner equivalent to a direct FIR convolution.
pub struct EfficientFir {
    poles: Vec<Pole>,
    samples: MirrorBuffer,
    window_len: usize,
    gain: f64,
}

impl EfficientFir {
    /// Lower a designed filter into the recursive form.
    pub fn from_filter(filter: &FirFilter) -> Result<Self> {
        Self::from_taps(filter.taps())
    }

    /// Decompose an arbitrary tap set into retained complex poles.
    pub fn from_taps(taps: &[f64]) -> Result<Self> {
        if taps.is_empty() {
            return Err(FilterError::EmptyTaps);
        }
        let len = taps.len();

        // conjugate symmetry of a real tap spectrum: only bins 0..=L/2 are
        // needed, paired bins fold into a factor of two on the numerator
        let mut spectrum = Vec::with_capacity(len / 2 + 1);
        for m in 0..=(len / 2) {
            let mut bin = Complex64::new(0.0, 0.0);
            for (n, c) in taps.iter().enumerate() {
                bin += Complex64::from_polar(1.0, -TAU * (m * n) as f64 / len as f64).scale(*c);
            }
            spectrum.push(bin);
        }
        let peak = spectrum.iter().map(|c| c.norm()).fold(0.0f64, f64::max);

        let mut poles = Vec::new();
        for (m, bin) in spectrum.into_iter().enumerate() {
            if bin.norm() <= peak * POLE_PRUNE_EPSILON {
                continue;
            }
            let fold = if m == 0 || (len % 2 == 0 && m == len / 2) {
                1.0
            } else {
                2.0
            };
            poles.push(Pole {
                num: bin.scale(fold / len as f64),
                den: Complex64::from_polar(1.0, TAU * m as f64 / len as f64),
                acc: Complex64::new(0.0, 0.0),
            });
        }

        Ok(Self {
            poles,
            samples: MirrorBuffer::new(len)?,
            window_len: len,
            gain: 1.0,
        })
    }

    /// Number of retained complex poles.
    pub fn n_poles(&self) -> usize {
        self.poles.len()
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Scalar applied to every output, absorbing external normalization.
    pub fn set_gain(&mut self, gain: f64) {
        self.gain = gain;
    }

    /// Zero the resonator accumulators and the sample window.
    pub fn reset(&mut self) {
        for pole in self.poles.iter_mut() {
            pole.acc = Complex64::new(0.0, 0.0);
        }
        self.samples.reset();
    }
}

impl SampleFilter for EfficientFir {
    fn process(&mut self, sample: f64) -> f64 {
        // the comb term: incoming sample minus the one leaving the window,
        // read before the push overwrites it
        let delta = sample - self.samples.oldest();
        self.samples.push(sample);

        let mut out = 0.0;
        for pole in self.poles.iter_mut() {
            let re = delta * pole.num.re + (pole.acc.re * pole.den.re - pole.acc.im * pole.den.im);
            pole.acc.im =
                delta * pole.num.im + (pole.acc.im * pole.den.re + pole.acc.re * pole.den.im);
            pole.acc.re = re;
            out += re;
        }
        out * self.gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_processing::fir::FirFilter;

    #[test]
    fn test_quadrature_taps_retain_a_single_pole() {
        let sine = FirFilter::sine(4000.0, 50.0, 80).unwrap();
        let cosine = FirFilter::cosine(4000.0, 50.0, 80).unwrap();
        assert_eq!(EfficientFir::from_filter(&sine).unwrap().n_poles(), 1);
        assert_eq!(EfficientFir::from_filter(&cosine).unwrap().n_poles(), 1);
    }

    #[test]
    fn test_matches_direct_convolution_on_impulse() {
        let mut direct = FirFilter::lowpass(4000.0, 50.0, 100.0, 20, true).unwrap();
        let mut recursive = EfficientFir::from_filter(&direct).unwrap();
        for k in 0..64 {
            let x = if k == 0 { 1.0 } else { 0.0 };
            let yd = SampleFilter::process(&mut direct, x);
            let yr = SampleFilter::process(&mut recursive, x);
            assert!((yd - yr).abs() < 1e-9, "sample {}: {} vs {}", k, yd, yr);
        }
    }

    #[test]
    fn test_reset_restores_zero_state() {
        let filter = FirFilter::sine(4000.0, 50.0, 80).unwrap();
        let mut recursive = EfficientFir::from_filter(&filter).unwrap();
        SampleFilter::process(&mut recursive, 1.0);
        recursive.reset();
        assert_eq!(SampleFilter::process(&mut recursive, 0.0), 0.0);
    }

    #[test]
    fn test_empty_taps_rejected() {
        assert!(EfficientFir::from_taps(&[]).is_err());
    }
}
