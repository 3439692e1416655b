//! Filter design configuration.
//!
//! A [`FirDesign`] fully describes one FIR filter: the sampling context
//! (sample rate and nominal line frequency), the response shape, the order,
//! the tapering window and the pass-band scaling flag. The design stage
//! consumes it by value and derives the tap set from it; nothing here is
//! process-wide state.

use crate::signal_processing::Window;

/// Frequency response shape of a designed FIR filter.
///
/// The four band kinds carry their cutoff frequencies in Hz. The quadrature
/// kinds (`Sine`, `Cosine`, `Hartley`) have no cutoffs: their taps span one
/// nominal line period and extract the fundamental's Fourier components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    /// Pass below `cutoff`, reject above.
    Lowpass { cutoff: f64 },
    /// Reject below `cutoff`, pass above.
    Highpass { cutoff: f64 },
    /// Pass between `low` and `high`.
    Bandpass { low: f64, high: f64 },
    /// Reject between `low` and `high`.
    Bandstop { low: f64, high: f64 },
    /// Quadrature sine extractor at the nominal frequency.
    Sine,
    /// Quadrature cosine extractor at the nominal frequency.
    Cosine,
    /// Sine/cosine combination peaking at the nominal frequency with the
    /// given phase offset in radians; zero phase reproduces `Cosine`.
    Hartley { phase: f64 },
}

/// Complete design record for one FIR filter.
///
/// # Example
/// ```
/// use linefilt::{FirDesign, FilterKind};
///
/// let mut design = FirDesign::default();
/// design.kind = FilterKind::Bandpass { low: 45.0, high: 55.0 };
/// design.order = 80;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirDesign {
    /// ADC sample rate in Hz.
    pub sample_rate: f64,
    /// Nominal power-system frequency in Hz (50 or 60).
    pub nominal_freq: f64,
    /// Response shape and its cutoffs.
    pub kind: FilterKind,
    /// Filter order. Band kinds produce `order + 1` taps; the quadrature
    /// kinds require `order` to equal one nominal period (`Fs / Fn` samples)
    /// and produce exactly that many taps.
    pub order: usize,
    /// Tapering window applied to the ideal impulse response. Ignored by the
    /// quadrature kinds, whose taps are analytic.
    pub window: Window,
    /// When set, taps are renormalized so the ideal pass-band gain is
    /// exactly 1: at DC for low-pass and band-stop, at Nyquist for
    /// high-pass, at the band center for band-pass.
    pub scale: bool,
}

impl Default for FirDesign {
    fn default() -> Self {
        Self {
            sample_rate: 4000.0,
            nominal_freq: 50.0,
            kind: FilterKind::Lowpass { cutoff: 100.0 },
            order: 40,
            window: Window::Hamming,
            scale: true,
        }
    }
}
