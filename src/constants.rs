//! Numeric constants shared across the design and numerics stages.

/// Maximum arithmetic-geometric-mean iterations for the elliptic functions.
/// The AGM sequence converges quadratically; 30 steps are far more than f64
/// accuracy ever needs, and each loop exits early on convergence.
pub const AGM_MAX_ITERATIONS: usize = 30;

/// Maximum terms of the alternating Bessel series before truncation.
pub const BESSEL_SERIES_MAX_TERMS: usize = 30;

/// Maximum terms of the modified Bessel series. The factorial denominators
/// reach the f64 ceiling long before this for any practical argument.
pub const MODIFIED_BESSEL_MAX_TERMS: u64 = 16;

/// Relative spectral-magnitude floor below which a frequency-sampling bin
/// is dropped from the recursive realization.
pub const POLE_PRUNE_EPSILON: f64 = 1e-12;
