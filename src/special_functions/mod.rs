//! Stateless numerical primitives backing the window-function library.

pub mod bessel;
pub mod elliptic;

pub use bessel::{bessel_j0, bessel_j1, bessel_jn, factorial, gamma_integer, modified_bessel_in};
pub use elliptic::{am, cn, dn, ellip_e, ellip_k, icn, idn, isn, sn};
