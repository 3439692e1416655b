//! FIR filter design and direct-convolution execution.
//!
//! The design stage turns a [`FirDesign`] into a tap set: ideal impulse
//! response truncation for the band kinds (windowed and optionally
//! renormalized), analytic one-period taps for the quadrature kinds. The run
//! stage pushes each sample into a mirrored ring buffer and accumulates the
//! tap products over one contiguous slice.

use std::f64::consts::{PI, TAU};
use std::fmt;

use num_complex::Complex64;

use crate::config::{FilterKind, FirDesign};
use crate::error::{FilterError, Result};
use crate::signal_processing::filter::SampleFilter;
use crate::signal_processing::mirror_buffer::MirrorBuffer;

/// Complex transfer-function value at one probe frequency.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyResponse {
    pub value: Complex64,
}

impl FrequencyResponse {
    /// Gain magnitude |W(e^{jw})|.
    pub fn magnitude(&self) -> f64 {
        self.value.norm()
    }

    /// Phase in radians.
    pub fn phase(&self) -> f64 {
        self.value.arg()
    }

    /// Phase in degrees.
    pub fn phase_degrees(&self) -> f64 {
        self.value.arg().to_degrees()
    }
}

/// Evaluate W(e^{jw}) = sum c[n]·e^{-jwn} for an arbitrary tap set.
fn response_at(taps: &[f64], sample_rate: f64, freq: f64) -> Complex64 {
    let omega = TAU * freq / sample_rate;
    taps.iter()
        .enumerate()
        .map(|(n, c)| Complex64::from_polar(1.0, -omega * n as f64).scale(*c))
        .sum()
}

/// Windowed-sinc / quadrature FIR filter with a mirrored sample window.
pub struct FirFilter {
    design: Option<FirDesign>,
    sample_rate: f64,
    taps: Vec<f64>,
    samples: MirrorBuffer,
}

impl FirFilter {
    /// Derive taps from a design record and return a ready-to-run filter.
    pub fn design(design: FirDesign) -> Result<Self> {
        let taps = compute_taps(&design)?;
        let samples = MirrorBuffer::new(taps.len())?;
        log::debug!(
            "designed {:?} filter: {} taps at {} Hz",
            design.kind,
            taps.len(),
            design.sample_rate
        );
        Ok(Self {
            design: Some(design),
            sample_rate: design.sample_rate,
            taps,
            samples,
        })
    }

    /// Low-pass filter with cutoff `f_stop` Hz. Uses the default Hamming
    /// window; build a [`FirDesign`] directly for other windows.
    pub fn lowpass(
        sample_rate: f64,
        nominal_freq: f64,
        f_stop: f64,
        order: usize,
        scale: bool,
    ) -> Result<Self> {
        Self::design(FirDesign {
            sample_rate,
            nominal_freq,
            kind: FilterKind::Lowpass { cutoff: f_stop },
            order,
            scale,
            ..FirDesign::default()
        })
    }

    /// High-pass filter with cutoff `f_stop` Hz.
    pub fn highpass(
        sample_rate: f64,
        nominal_freq: f64,
        f_stop: f64,
        order: usize,
        scale: bool,
    ) -> Result<Self> {
        Self::design(FirDesign {
            sample_rate,
            nominal_freq,
            kind: FilterKind::Highpass { cutoff: f_stop },
            order,
            scale,
            ..FirDesign::default()
        })
    }

    /// Band-pass filter passing `f_stop1..f_stop2` Hz.
    pub fn bandpass(
        sample_rate: f64,
        nominal_freq: f64,
        f_stop1: f64,
        f_stop2: f64,
        order: usize,
        scale: bool,
    ) -> Result<Self> {
        Self::design(FirDesign {
            sample_rate,
            nominal_freq,
            kind: FilterKind::Bandpass {
                low: f_stop1,
                high: f_stop2,
            },
            order,
            scale,
            ..FirDesign::default()
        })
    }

    /// Band-stop filter rejecting `f_stop1..f_stop2` Hz.
    pub fn bandstop(
        sample_rate: f64,
        nominal_freq: f64,
        f_stop1: f64,
        f_stop2: f64,
        order: usize,
        scale: bool,
    ) -> Result<Self> {
        Self::design(FirDesign {
            sample_rate,
            nominal_freq,
            kind: FilterKind::Bandstop {
                low: f_stop1,
                high: f_stop2,
            },
            order,
            scale,
            ..FirDesign::default()
        })
    }

    /// Quadrature sine extractor; `order` must span one nominal period.
    pub fn sine(sample_rate: f64, nominal_freq: f64, order: usize) -> Result<Self> {
        Self::design(FirDesign {
            sample_rate,
            nominal_freq,
            kind: FilterKind::Sine,
            order,
            scale: false,
            ..FirDesign::default()
        })
    }

    /// Quadrature cosine extractor; `order` must span one nominal period.
    pub fn cosine(sample_rate: f64, nominal_freq: f64, order: usize) -> Result<Self> {
        Self::design(FirDesign {
            sample_rate,
            nominal_freq,
            kind: FilterKind::Cosine,
            order,
            scale: false,
            ..FirDesign::default()
        })
    }

    /// Hartley filter: quadrature pair combined at phase `phase` radians.
    pub fn hartley(sample_rate: f64, nominal_freq: f64, phase: f64, order: usize) -> Result<Self> {
        Self::design(FirDesign {
            sample_rate,
            nominal_freq,
            kind: FilterKind::Hartley { phase },
            order,
            scale: false,
            ..FirDesign::default()
        })
    }

    /// Wrap an externally supplied tap set. The filter has no design record;
    /// [`FirFilter::design_record`] returns `None`.
    pub fn from_taps(taps: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if sample_rate <= 0.0 {
            return Err(FilterError::InvalidSampleRate(sample_rate));
        }
        if taps.is_empty() {
            return Err(FilterError::EmptyTaps);
        }
        let samples = MirrorBuffer::new(taps.len())?;
        Ok(Self {
            design: None,
            sample_rate,
            taps,
            samples,
        })
    }

    /// Replace the design record, re-derive the taps and reset run state.
    pub fn set_design(&mut self, design: FirDesign) -> Result<()> {
        let taps = compute_taps(&design)?;
        self.samples = MirrorBuffer::new(taps.len())?;
        self.sample_rate = design.sample_rate;
        self.taps = taps;
        self.design = Some(design);
        Ok(())
    }

    /// Push a sample without computing an output. Pairs with [`output`] when
    /// the window is filled externally to the convolution cadence.
    ///
    /// [`output`]: FirFilter::output
    #[inline]
    pub fn push(&mut self, sample: f64) {
        self.samples.push(sample);
    }

    /// Convolve the taps with the current sample window.
    #[inline]
    pub fn output(&self) -> f64 {
        self.taps
            .iter()
            .zip(self.samples.window())
            .map(|(c, s)| c * s)
            .sum()
    }

    /// Convenience over the f64 path for single-precision sample streams.
    pub fn process_f32(&mut self, sample: f32) -> f32 {
        SampleFilter::process(self, sample as f64) as f32
    }

    /// Transfer function at the probe frequency in Hz.
    pub fn frequency_response(&self, freq: f64) -> FrequencyResponse {
        FrequencyResponse {
            value: response_at(&self.taps, self.sample_rate, freq),
        }
    }

    /// Convolve the current taps with an external tap set, producing the
    /// single filter equivalent to running both in series. The combined taps
    /// no longer follow one design recipe, so the design record is dropped
    /// and the sample window grows to the combined length.
    pub fn cascade(&mut self, other: &[f64]) -> Result<()> {
        if other.is_empty() {
            return Err(FilterError::EmptyTaps);
        }
        let mut combined = vec![0.0; self.taps.len() + other.len() - 1];
        for (i, a) in self.taps.iter().enumerate() {
            for (j, b) in other.iter().enumerate() {
                combined[i + j] += a * b;
            }
        }
        self.samples = MirrorBuffer::new(combined.len())?;
        log::debug!(
            "cascaded {}-tap set into {}-tap filter",
            other.len(),
            combined.len()
        );
        self.taps = combined;
        self.design = None;
        Ok(())
    }

    /// Tap coefficients, index 0 applying to the newest sample.
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Single tap, `None` out of range.
    pub fn tap(&self, n: usize) -> Option<f64> {
        self.taps.get(n).copied()
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Design order: the recorded order for designed filters, tap count
    /// minus one for external tap sets.
    pub fn order(&self) -> usize {
        match &self.design {
            Some(design) => design.order,
            None => self.taps.len() - 1,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The design record, if the taps were derived from one.
    pub fn design_record(&self) -> Option<&FirDesign> {
        self.design.as_ref()
    }

    /// Clear the sample window without touching the taps.
    pub fn reset(&mut self) {
        self.samples.reset();
    }
}

impl SampleFilter for FirFilter {
    fn process(&mut self, sample: f64) -> f64 {
        self.push(sample);
        self.output()
    }
}

impl fmt::Display for FirFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.design {
            Some(d) => write!(
                f,
                "FIR {:?}: Fs {} Hz, Fn {} Hz, order {}, {} taps, window {:?}, scale {}",
                d.kind,
                d.sample_rate,
                d.nominal_freq,
                d.order,
                self.taps.len(),
                d.window,
                d.scale
            ),
            None => write!(
                f,
                "FIR custom: Fs {} Hz, {} taps",
                self.sample_rate,
                self.taps.len()
            ),
        }
    }
}

fn validate_common(design: &FirDesign) -> Result<()> {
    if design.sample_rate <= 0.0 {
        return Err(FilterError::InvalidSampleRate(design.sample_rate));
    }
    if design.nominal_freq <= 0.0 {
        return Err(FilterError::InvalidNominalFrequency(design.nominal_freq));
    }
    if design.order == 0 {
        return Err(FilterError::ZeroOrder);
    }
    Ok(())
}

fn check_cutoff(cutoff: f64, sample_rate: f64) -> Result<()> {
    let nyquist = sample_rate / 2.0;
    if cutoff <= 0.0 || cutoff >= nyquist {
        return Err(FilterError::CutoffOutOfRange { cutoff, nyquist });
    }
    Ok(())
}

fn check_band(low: f64, high: f64, sample_rate: f64) -> Result<()> {
    check_cutoff(low, sample_rate)?;
    check_cutoff(high, sample_rate)?;
    if low >= high {
        return Err(FilterError::BandEdgesOutOfOrder { low, high });
    }
    Ok(())
}

fn check_even_order(order: usize) -> Result<()> {
    if order % 2 != 0 {
        return Err(FilterError::OddOrderInversion(order));
    }
    Ok(())
}

/// Samples per nominal period, after checking the order spans exactly one.
fn check_period_order(design: &FirDesign) -> Result<usize> {
    let expected = (design.sample_rate / design.nominal_freq).round() as usize;
    if design.order != expected {
        return Err(FilterError::OrderPeriodMismatch {
            order: design.order,
            expected,
        });
    }
    if expected < 2 {
        return Err(FilterError::NominalPeriodTooShort {
            samples: design.sample_rate / design.nominal_freq,
        });
    }
    Ok(expected)
}

fn compute_taps(design: &FirDesign) -> Result<Vec<f64>> {
    validate_common(design)?;
    match design.kind {
        FilterKind::Lowpass { cutoff } => lowpass_taps(design, cutoff),
        FilterKind::Highpass { cutoff } => highpass_taps(design, cutoff),
        FilterKind::Bandpass { low, high } => bandpass_taps(design, low, high),
        FilterKind::Bandstop { low, high } => bandstop_taps(design, low, high),
        FilterKind::Sine => quadrature_taps(design, PI / 2.0),
        FilterKind::Cosine => quadrature_taps(design, 0.0),
        FilterKind::Hartley { phase } => quadrature_taps(design, phase),
    }
}

/// Windowed truncation of the ideal low-pass impulse response. The midpoint
/// value wc/pi is analytic, never a 0/0 division.
fn windowed_lowpass(design: &FirDesign, cutoff: f64) -> Vec<f64> {
    let midpoint = design.order as f64 / 2.0;
    let omega = TAU * cutoff / design.sample_rate;
    let window = design.window.build(design.order + 1);
    (0..=design.order)
        .zip(window)
        .map(|(n, w)| {
            let k = n as f64 - midpoint;
            let ideal = if k == 0.0 {
                omega / PI
            } else {
                (omega * k).sin() / (PI * k)
            };
            ideal * w
        })
        .collect()
}

fn normalize_dc(taps: &mut [f64]) {
    let gain: f64 = taps.iter().sum();
    for c in taps.iter_mut() {
        *c /= gain;
    }
}

fn normalize_nyquist(taps: &mut [f64]) {
    let gain: f64 = taps
        .iter()
        .enumerate()
        .map(|(n, c)| if n % 2 == 0 { *c } else { -*c })
        .sum();
    for c in taps.iter_mut() {
        *c /= gain;
    }
}

fn normalize_at(taps: &mut [f64], sample_rate: f64, freq: f64) {
    let gain = response_at(taps, sample_rate, freq).norm();
    for c in taps.iter_mut() {
        *c /= gain;
    }
}

fn lowpass_taps(design: &FirDesign, cutoff: f64) -> Result<Vec<f64>> {
    check_cutoff(cutoff, design.sample_rate)?;
    let mut taps = windowed_lowpass(design, cutoff);
    if design.scale {
        normalize_dc(&mut taps);
    }
    Ok(taps)
}

/// Spectral inversion of the DC-normalized low-pass: negate every tap and
/// add a unit impulse at the midpoint. Requires an even order so the
/// midpoint is a whole tap.
fn highpass_taps(design: &FirDesign, cutoff: f64) -> Result<Vec<f64>> {
    check_cutoff(cutoff, design.sample_rate)?;
    check_even_order(design.order)?;
    let mut taps = windowed_lowpass(design, cutoff);
    normalize_dc(&mut taps);
    for c in taps.iter_mut() {
        *c = -*c;
    }
    taps[design.order / 2] += 1.0;
    if design.scale {
        normalize_nyquist(&mut taps);
    }
    Ok(taps)
}

/// Difference of two sinc responses; the midpoint is (w2 - w1)/pi.
fn windowed_bandpass(design: &FirDesign, low: f64, high: f64) -> Vec<f64> {
    let midpoint = design.order as f64 / 2.0;
    let omega1 = TAU * low / design.sample_rate;
    let omega2 = TAU * high / design.sample_rate;
    let window = design.window.build(design.order + 1);
    (0..=design.order)
        .zip(window)
        .map(|(n, w)| {
            let k = n as f64 - midpoint;
            let ideal = if k == 0.0 {
                (omega2 - omega1) / PI
            } else {
                ((omega2 * k).sin() - (omega1 * k).sin()) / (PI * k)
            };
            ideal * w
        })
        .collect()
}

fn bandpass_taps(design: &FirDesign, low: f64, high: f64) -> Result<Vec<f64>> {
    check_band(low, high, design.sample_rate)?;
    let mut taps = windowed_bandpass(design, low, high);
    if design.scale {
        normalize_at(&mut taps, design.sample_rate, (low + high) / 2.0);
    }
    Ok(taps)
}

/// Spectral inversion of the center-normalized band-pass.
fn bandstop_taps(design: &FirDesign, low: f64, high: f64) -> Result<Vec<f64>> {
    check_band(low, high, design.sample_rate)?;
    check_even_order(design.order)?;
    let mut taps = windowed_bandpass(design, low, high);
    normalize_at(&mut taps, design.sample_rate, (low + high) / 2.0);
    for c in taps.iter_mut() {
        *c = -*c;
    }
    taps[design.order / 2] += 1.0;
    if design.scale {
        normalize_dc(&mut taps);
    }
    Ok(taps)
}

/// One nominal period of (2/N)·cos(2pi·n/N - phase). A phase of 0 is the
/// cosine filter, pi/2 the sine filter; anything else is a Hartley filter.
fn quadrature_taps(design: &FirDesign, phase: f64) -> Result<Vec<f64>> {
    let period = check_period_order(design)?;
    let n = period as f64;
    Ok((0..period)
        .map(|k| 2.0 / n * (TAU * k as f64 / n - phase).cos())
        .collect())
}
