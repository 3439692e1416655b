//! Window functions for FIR tap shaping.
//!
//! Each family produces a length-N tapering sequence that multiplies the
//! ideal impulse response during the design stage. The parameterized
//! families carry their parameter in the variant; everything is computed in
//! f64 and returned as a plain vector.

use std::f64::consts::PI;

use crate::special_functions::modified_bessel_in;

/// Window family, one variant per tapering sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Window {
    Bartlett,
    BartlettHanning,
    Blackman,
    BlackmanHarris,
    Bohman,
    /// Dolph-Chebyshev window with the given sidelobe attenuation in dB.
    Chebyshev { attenuation_db: f64 },
    FlatTop,
    /// Gaussian window; sigma is (N − 1) / (2 * alpha).
    Gaussian { alpha: f64 },
    Hamming,
    Hann,
    /// Kaiser window with shape parameter beta.
    Kaiser { beta: f64 },
    Nuttall,
    Parzen,
    Rectangular,
    Triangular,
    /// Tukey (tapered cosine) window; `taper` in (0, 1] is the fraction of
    /// the window inside the cosine lobes. A taper of 1 is the Hann window.
    Tukey { taper: f64 },
}

impl Default for Window {
    fn default() -> Self {
        Window::Hamming
    }
}

impl Window {
    /// Build the weight sequence for the given length.
    pub fn build(&self, len: usize) -> Vec<f64> {
        if len <= 1 {
            return vec![1.0; len];
        }
        match *self {
            Window::Bartlett => bartlett(len),
            Window::BartlettHanning => bartlett_hanning(len),
            Window::Blackman => blackman(len),
            Window::BlackmanHarris => blackman_harris(len),
            Window::Bohman => bohman(len),
            Window::Chebyshev { attenuation_db } => chebyshev(len, attenuation_db),
            Window::FlatTop => flat_top(len),
            Window::Gaussian { alpha } => gaussian(len, alpha),
            Window::Hamming => raised_cosine(len, &[0.54, -0.46]),
            Window::Hann => raised_cosine(len, &[0.5, -0.5]),
            Window::Kaiser { beta } => kaiser(len, beta),
            Window::Nuttall => raised_cosine(len, &[0.3635819, -0.4891775, 0.1365995, -0.0106411]),
            Window::Parzen => parzen(len),
            Window::Rectangular => vec![1.0; len],
            Window::Triangular => triangular(len),
            Window::Tukey { taper } => tukey(len, taper),
        }
    }
}

/// Cosine-sum windows: w(n) = Σₖ aₖ·cos(2πk·n/(N−1)).
fn raised_cosine(len: usize, coeffs: &[f64]) -> Vec<f64> {
    let span = (len - 1) as f64;
    (0..len)
        .map(|n| {
            coeffs
                .iter()
                .enumerate()
                .map(|(k, a)| a * (2.0 * PI * k as f64 * n as f64 / span).cos())
                .sum()
        })
        .collect()
}

fn bartlett(len: usize) -> Vec<f64> {
    let span = (len - 1) as f64;
    (0..len)
        .map(|n| {
            let n = n as f64;
            if n <= span / 2.0 {
                2.0 * n / span
            } else {
                2.0 - 2.0 * n / span
            }
        })
        .collect()
}

fn bartlett_hanning(len: usize) -> Vec<f64> {
    let span = (len - 1) as f64;
    (0..len)
        .map(|n| {
            let x = n as f64 / span - 0.5;
            0.62 - 0.48 * x.abs() + 0.38 * (2.0 * PI * x).cos()
        })
        .collect()
}

fn blackman(len: usize) -> Vec<f64> {
    raised_cosine(len, &[0.42, -0.5, 0.08])
}

fn blackman_harris(len: usize) -> Vec<f64> {
    raised_cosine(len, &[0.35875, -0.48829, 0.14128, -0.01168])
}

fn bohman(len: usize) -> Vec<f64> {
    let half = (len as f64 / 2.0).ceil();
    (0..len)
        .map(|k| {
            let mut n = k as f64 - half;
            if n >= 0.0 {
                n += 1.0;
            }
            let x = (n / (half + 1.0)).abs();
            (1.0 - x) * (PI * x).cos() + (PI * x).sin() / PI
        })
        .collect()
}

/// cheby_poly(n, x) = cos(n·acos x) inside the unit interval, continued with
/// cosh(n·acosh x) outside it.
fn cheby_poly(n: f64, x: f64) -> f64 {
    if x.abs() <= 1.0 {
        (n * x.acos()).cos()
    } else {
        (n * x.acosh()).cosh()
    }
}

fn chebyshev(len: usize, attenuation_db: f64) -> Vec<f64> {
    let ns = len as f64;
    let tg = 10.0f64.powf(attenuation_db / 20.0);
    let x0 = ((tg.acosh()) / (ns - 1.0)).cosh();
    let mid = if len % 2 == 0 {
        ns / 2.0
    } else {
        (ns - 1.0) / 2.0
    };
    let terms = mid.floor() as usize;

    // only the lower half is computed; the rest is mirrored
    let mut buff = vec![0.0; len];
    let mut max = 0.0f64;
    for nn in 0..(len / 2 + 1) {
        let n = nn as f64 - mid;
        let mut sum = 0.0;
        for kk in 1..=terms {
            let kk = kk as f64;
            sum += cheby_poly(ns - 1.0, x0 * (PI * kk / ns).cos()) * (2.0 * n * PI * kk / ns).cos();
        }
        buff[nn] = tg + 2.0 * sum;
        buff[len - nn - 1] = buff[nn];
        max = max.max(buff[nn]);
    }
    for w in buff.iter_mut() {
        *w /= max;
    }
    buff
}

fn flat_top(len: usize) -> Vec<f64> {
    raised_cosine(
        len,
        &[0.21557895, -0.41663158, 0.277263158, -0.083578947, 0.006947368],
    )
}

fn gaussian(len: usize, alpha: f64) -> Vec<f64> {
    let sigma = (len as f64 - 1.0) / (2.0 * alpha);
    let half = (len / 2) as f64;
    (0..len)
        .map(|k| {
            let mut n = k as f64 - half;
            if n >= 0.0 {
                n += 1.0;
            }
            (-n * n / (2.0 * sigma * sigma)).exp()
        })
        .collect()
}

fn kaiser(len: usize, beta: f64) -> Vec<f64> {
    let half_span = (len as f64 - 1.0) / 2.0;
    let denom = modified_bessel_in(beta, 0);
    (0..len)
        .map(|n| {
            let a = (n as f64 - half_span) / half_span;
            modified_bessel_in(beta * (1.0 - a * a).sqrt(), 0) / denom
        })
        .collect()
}

fn parzen(len: usize) -> Vec<f64> {
    let ns = len as f64;
    let half = (len / 2) as f64;
    let quarter = ((len - 1) / 4) as f64;
    (0..len)
        .map(|k| {
            let mut n = k as f64 - half;
            if n >= 0.0 {
                n += 1.0;
            }
            let m = n.abs();
            if m <= quarter {
                1.0 - 6.0 * m * m / (ns * ns / 4.0) + 6.0 * m * m * m / (ns * ns * ns / 8.0)
            } else if m < ns / 2.0 {
                2.0 * (1.0 - m / (ns / 2.0)).powi(3)
            } else {
                0.0
            }
        })
        .collect()
}

fn triangular(len: usize) -> Vec<f64> {
    let ns = len as f64;
    let divisor = if len % 2 == 0 {
        ns / 2.0
    } else {
        (ns + 1.0) / 2.0
    };
    (0..len)
        .map(|n| 1.0 - ((n as f64 - (ns - 1.0) / 2.0) / divisor).abs())
        .collect()
}

fn tukey(len: usize, taper: f64) -> Vec<f64> {
    let span = (len - 1) as f64;
    (0..len)
        .map(|n| {
            let x = n as f64 / span;
            if x < taper / 2.0 {
                0.5 + 0.5 * (2.0 * PI / taper * (x - taper / 2.0)).cos()
            } else if x >= 1.0 - taper / 2.0 {
                0.5 + 0.5 * (2.0 * PI / taper * (x - 1.0 + taper / 2.0)).cos()
            } else {
                1.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(w: &[f64], tol: f64) {
        for i in 0..w.len() / 2 {
            assert!(
                (w[i] - w[w.len() - 1 - i]).abs() < tol,
                "asymmetry at {}: {} vs {}",
                i,
                w[i],
                w[w.len() - 1 - i]
            );
        }
    }

    #[test]
    fn test_hamming_profile() {
        let w = Window::Hamming.build(41);
        assert_eq!(w.len(), 41);
        assert!((w[0] - 0.08).abs() < 1e-12);
        assert!((w[20] - 1.0).abs() < 1e-12);
        assert_symmetric(&w, 1e-12);
    }

    #[test]
    fn test_hann_endpoints_are_zero() {
        let w = Window::Hann.build(33);
        assert!(w[0].abs() < 1e-12);
        assert!(w[32].abs() < 1e-12);
        assert!((w[16] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rectangular_is_flat() {
        assert!(Window::Rectangular.build(17).iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_chebyshev_normalized_and_symmetric() {
        for len in [32, 33] {
            let w = Window::Chebyshev { attenuation_db: 60.0 }.build(len);
            let peak = w.iter().cloned().fold(0.0f64, f64::max);
            assert!((peak - 1.0).abs() < 1e-12);
            assert_symmetric(&w, 1e-9);
            assert!(w.iter().all(|&v| v.abs() <= 1.0 + 1e-12));
        }
    }

    #[test]
    fn test_kaiser_center_peak() {
        let w = Window::Kaiser { beta: 8.0 }.build(41);
        assert!((w[20] - 1.0).abs() < 1e-12);
        assert_symmetric(&w, 1e-12);
        assert!(w[0] < 0.01);
    }

    #[test]
    fn test_tukey_full_taper_is_hann() {
        let tukey = Window::Tukey { taper: 1.0 }.build(21);
        let hann = Window::Hann.build(21);
        for (t, h) in tukey.iter().zip(&hann) {
            assert!((t - h).abs() < 1e-9);
        }
    }

    #[test]
    fn test_all_families_produce_finite_weights() {
        let families = [
            Window::Bartlett,
            Window::BartlettHanning,
            Window::Blackman,
            Window::BlackmanHarris,
            Window::Bohman,
            Window::Chebyshev { attenuation_db: 80.0 },
            Window::FlatTop,
            Window::Gaussian { alpha: 2.5 },
            Window::Hamming,
            Window::Hann,
            Window::Kaiser { beta: 5.0 },
            Window::Nuttall,
            Window::Parzen,
            Window::Rectangular,
            Window::Triangular,
            Window::Tukey { taper: 0.5 },
        ];
        for family in families {
            for len in [16, 41] {
                let w = family.build(len);
                assert_eq!(w.len(), len);
                assert!(w.iter().all(|v| v.is_finite()), "{:?}", family);
            }
        }
    }
}
