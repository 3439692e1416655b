pub mod aperiodic;
pub mod efficient;
pub mod filter;
pub mod fir;
pub mod mirror_buffer;
pub mod recursive_fourier;
pub mod window;

pub use aperiodic::AperiodicFilter;
pub use efficient::EfficientFir;
pub use filter::SampleFilter;
pub use fir::{FirFilter, FrequencyResponse};
pub use mirror_buffer::MirrorBuffer;
pub use recursive_fourier::RecursiveFourier;
pub use window::Window;
