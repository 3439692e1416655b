use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Cutoff frequency {cutoff} Hz outside (0, {nyquist}) Hz")]
    CutoffOutOfRange { cutoff: f64, nyquist: f64 },

    #[error("Band edges out of order: {low} Hz >= {high} Hz")]
    BandEdgesOutOfOrder { low: f64, high: f64 },

    #[error("Sample rate must be positive, got {0} Hz")]
    InvalidSampleRate(f64),

    #[error("Nominal frequency must be positive, got {0} Hz")]
    InvalidNominalFrequency(f64),

    #[error("Filter order must be positive")]
    ZeroOrder,

    #[error("Spectral inversion requires an even order, got {0}")]
    OddOrderInversion(usize),

    #[error("Order {order} does not span one nominal period ({expected} samples)")]
    OrderPeriodMismatch { order: usize, expected: usize },

    #[error("Nominal period of {samples:.2} samples is too short")]
    NominalPeriodTooShort { samples: f64 },

    #[error("Empty tap set")]
    EmptyTaps,

    #[error("Buffer allocation failed: {0}")]
    Allocation(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
