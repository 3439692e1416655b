//! Shared signal generators for the integration suites.

use std::f64::consts::TAU;

/// Sampled cosine `amplitude·cos(2π·freq·t + phase)`.
pub fn tone(freq: f64, sample_rate: f64, amplitude: f64, phase: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|k| amplitude * (TAU * freq * k as f64 / sample_rate + phase).cos())
        .collect()
}

/// Decaying DC offset `amplitude·e^{-t/tau}`, the aperiodic component of a
/// faulted power-system signal.
pub fn decaying_exponential(amplitude: f64, tau: f64, sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|k| amplitude * (-(k as f64 / sample_rate) / tau).exp())
        .collect()
}

/// Deterministic white noise from a fixed-seed LCG, so comparisons between
/// the two run paths are reproducible.
pub fn white_noise(len: usize) -> Vec<f64> {
    let mut state: u64 = 0xDEAD_BEEF_CAFE_BABE;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 33) as i32) as f64 / (i32::MAX as f64)
        })
        .collect()
}

/// Amplitude of a steady sinusoid from its RMS over whole periods.
pub fn rms_amplitude(samples: &[f64]) -> f64 {
    let mean_square = samples.iter().map(|x| x * x).sum::<f64>() / samples.len() as f64;
    (2.0 * mean_square).sqrt()
}
