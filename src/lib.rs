pub mod config;
pub mod constants;
pub mod error;
pub mod signal_processing;
pub mod special_functions;

pub use config::{FilterKind, FirDesign};
pub use error::{FilterError, Result};
pub use signal_processing::{
    AperiodicFilter, EfficientFir, FirFilter, FrequencyResponse, MirrorBuffer, RecursiveFourier,
    SampleFilter, Window,
};
