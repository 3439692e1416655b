//! Jacobi elliptic functions and complete elliptic integrals.
//!
//! Everything runs on the arithmetic-geometric mean: at most
//! [`AGM_MAX_ITERATIONS`] Gauss steps, exiting early once
//! `|aₙ − gₙ| < aₙ·ε`. Moduli outside [−1, 1] are clamped to the nearest
//! edge before use.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::constants::AGM_MAX_ITERATIONS;

fn clamp_modulus(k: f64) -> f64 {
    k.abs().min(1.0)
}

/// Jacobi amplitude function am(u, k).
pub fn am(u: f64, k: f64) -> f64 {
    let k = clamp_modulus(k);

    // degenerate moduli have closed forms
    if k == 0.0 {
        return u;
    }
    if k == 1.0 {
        return 2.0 * u.exp().atan() - FRAC_PI_2;
    }

    let mut a = [0.0f64; AGM_MAX_ITERATIONS + 1];
    let mut g = [0.0f64; AGM_MAX_ITERATIONS + 1];
    let mut c = [0.0f64; AGM_MAX_ITERATIONS + 1];
    a[0] = 1.0;
    g[0] = (1.0 - k * k).sqrt();
    c[0] = k;

    let mut two_n = 1.0f64;
    let mut n = 0;
    while n < AGM_MAX_ITERATIONS {
        if (a[n] - g[n]).abs() < a[n] * f64::EPSILON {
            break;
        }
        two_n += two_n;
        a[n + 1] = 0.5 * (a[n] + g[n]);
        g[n + 1] = (a[n] * g[n]).sqrt();
        c[n + 1] = 0.5 * (a[n] - g[n]);
        n += 1;
    }

    // backward substitution
    let mut phi = two_n * a[n] * u;
    for m in (1..=n).rev() {
        phi = 0.5 * (phi + (c[m] * phi.sin() / a[m]).asin());
    }
    phi
}

/// Jacobi elliptic sn(u, k) = sin(am(u, k)).
pub fn sn(u: f64, k: f64) -> f64 {
    am(u, k).sin()
}

/// Jacobi elliptic cn(u, k) = cos(am(u, k)).
pub fn cn(u: f64, k: f64) -> f64 {
    am(u, k).cos()
}

/// Jacobi elliptic dn(u, k) = √(1 − k²·sn²(u, k)).
pub fn dn(u: f64, k: f64) -> f64 {
    let s = sn(u, k);
    (1.0 - k * k * s * s).sqrt()
}

/// Backward AGM recursion shared by the inverse Jacobi functions. `phi0` is
/// the seed angle and `jump_tol` the branch-detection threshold the original
/// algorithm uses to track how many half-turns the angle has unwound.
fn agm_inverse(phi0: f64, k: f64, jump_tol: f64) -> f64 {
    let mut a = [0.0f64; AGM_MAX_ITERATIONS + 1];
    let mut g = [0.0f64; AGM_MAX_ITERATIONS + 1];
    let mut s = [0.0f64; AGM_MAX_ITERATIONS + 1];
    a[0] = 1.0;
    g[0] = (1.0 - k * k).sqrt();

    let mut two_n = 1.0f64;
    for n in 0..AGM_MAX_ITERATIONS - 1 {
        s[n] = 0.0;
        two_n += two_n;
        a[n + 1] = 0.5 * (a[n] + g[n]);
        g[n + 1] = (a[n] * g[n]).sqrt();
    }

    let mut phi = phi0;
    for n in 1..AGM_MAX_ITERATIONS {
        let phi_old = phi;
        phi = (g[n - 1] / a[n - 1] * phi.tan()).atan() + phi;
        if (2.0 * phi_old - phi).abs() < jump_tol {
            s[n] = 2.0 * s[n - 1];
        } else if (2.0 * phi_old - phi).abs() > FRAC_PI_2 {
            s[n] = 2.0 * s[n - 1] + 1.0;
        }
    }

    let last = AGM_MAX_ITERATIONS - 1;
    (phi + s[last] * PI) / two_n / a[last]
}

/// Inverse of [`sn`]: returns u such that sn(u, k) equals the argument.
pub fn isn(sn_value: f64, k: f64) -> f64 {
    let k = clamp_modulus(k);
    let u = agm_inverse(sn_value.abs().asin(), k, 1e-3);
    if sn_value < 0.0 {
        -u
    } else {
        u
    }
}

/// Inverse of [`cn`]: returns u such that cn(u, k) equals the argument.
pub fn icn(cn_value: f64, k: f64) -> f64 {
    let k = clamp_modulus(k);
    agm_inverse(cn_value.acos(), k, 5.0 * PI / 180.0)
}

/// Inverse of [`dn`]: returns u such that dn(u, k) equals the argument.
pub fn idn(dn_value: f64, k: f64) -> f64 {
    let k = clamp_modulus(k);
    agm_inverse(((1.0 - dn_value * dn_value) / (k * k)).sqrt().asin(), k, 5.0 * PI / 180.0)
}

/// Complete elliptic integral of the first kind, K(k).
pub fn ellip_k(k: f64) -> f64 {
    let k = clamp_modulus(k);

    let mut a = [0.0f64; AGM_MAX_ITERATIONS + 1];
    let mut g = [0.0f64; AGM_MAX_ITERATIONS + 1];
    a[0] = 1.0;
    g[0] = (1.0 - k * k).sqrt();

    let mut n = 0;
    while n < AGM_MAX_ITERATIONS {
        if (a[n] - g[n]).abs() < a[n] * f64::EPSILON {
            break;
        }
        a[n + 1] = 0.5 * (a[n] + g[n]);
        g[n + 1] = (a[n] * g[n]).sqrt();
        n += 1;
    }

    FRAC_PI_2 / a[n]
}

/// Complete elliptic integral of the second kind, E(k).
pub fn ellip_e(k: f64) -> f64 {
    let k = clamp_modulus(k);

    let mut a = [0.0f64; AGM_MAX_ITERATIONS + 1];
    let mut g = [0.0f64; AGM_MAX_ITERATIONS + 1];
    let mut c = [0.0f64; AGM_MAX_ITERATIONS + 1];
    a[0] = 1.0;
    g[0] = (1.0 - k * k).sqrt();
    c[0] = k;

    let mut two_n = 1.0f64;
    let mut sum = 0.0;
    let mut n = 0;
    while n < AGM_MAX_ITERATIONS {
        if (a[n] - g[n]).abs() < a[n] * f64::EPSILON {
            break;
        }
        two_n += two_n;
        a[n + 1] = 0.5 * (a[n] + g[n]);
        g[n + 1] = (a[n] * g[n]).sqrt();
        c[n + 1] = 0.5 * (a[n] - g[n]);
        sum += 0.5 * c[n + 1] * c[n + 1] * two_n;
        n += 1;
    }

    FRAC_PI_2 * (1.0 - (sum + 0.5 * c[0] * c[0])) / a[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_moduli_reduce_to_trig() {
        for &u in &[-1.2, -0.3, 0.0, 0.4, 1.1] {
            assert!((sn(u, 0.0) - u.sin()).abs() < 1e-12);
            assert!((cn(u, 0.0) - u.cos()).abs() < 1e-12);
            assert!((dn(u, 0.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_jacobi_identities() {
        let k = 0.7;
        for &u in &[0.2, 0.5, 1.0, 1.7] {
            let (s, c, d) = (sn(u, k), cn(u, k), dn(u, k));
            assert!((s * s + c * c - 1.0).abs() < 1e-10);
            assert!((d * d + k * k * s * s - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_inverse_functions_recover_argument() {
        let k = 0.3;
        let u = 0.5;
        assert!((isn(sn(u, k), k) - u).abs() < 1e-6);
        assert!((icn(cn(u, k), k) - u).abs() < 1e-6);
        assert!((idn(dn(u, k), k) - u).abs() < 1e-6);
        assert!((isn(sn(-u, k), k) + u).abs() < 1e-6);
    }

    #[test]
    fn test_complete_integrals_reference_values() {
        assert!((ellip_k(0.0) - FRAC_PI_2).abs() < 1e-12);
        assert!((ellip_e(0.0) - FRAC_PI_2).abs() < 1e-12);
        assert!((ellip_k(0.5) - 1.685_750_354_8).abs() < 1e-9);
        assert!((ellip_e(0.5) - 1.467_462_209_3).abs() < 1e-9);
        assert!((ellip_k(0.9) - 2.280_549_138_4).abs() < 1e-9);
        assert!((ellip_e(0.9) - 1.171_697_052_7).abs() < 1e-9);
        // K grows without bound as k approaches 1
        assert!(ellip_k(0.99) > 3.3);
    }
}
