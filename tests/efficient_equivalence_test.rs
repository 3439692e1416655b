mod test_signals;

use linefilt::{EfficientFir, FirFilter, SampleFilter};

const FS: f64 = 4000.0;
const FN: f64 = 50.0;

/// Run both realizations over the same input and return the largest
/// per-sample difference.
fn max_divergence(direct: &mut FirFilter, recursive: &mut EfficientFir, input: &[f64]) -> f64 {
    input
        .iter()
        .map(|&x| (direct.process(x) - recursive.process(x)).abs())
        .fold(0.0f64, f64::max)
}

#[test]
fn test_lowpass_direct_and_recursive_agree_on_noise() {
    let mut direct = FirFilter::lowpass(FS, FN, 100.0, 40, true).unwrap();
    let mut recursive = EfficientFir::from_filter(&direct).unwrap();
    let input = test_signals::white_noise(1024);
    let peak = input.iter().fold(0.0f64, |m, x| m.max(x.abs()));

    let divergence = max_divergence(&mut direct, &mut recursive, &input);
    assert!(
        divergence <= 1e-6 * peak,
        "paths diverged by {}",
        divergence
    );
}

#[test]
fn test_bandpass_direct_and_recursive_agree_on_noise() {
    let mut direct = FirFilter::bandpass(FS, FN, 45.0, 55.0, 80, true).unwrap();
    let mut recursive = EfficientFir::from_filter(&direct).unwrap();
    let input = test_signals::white_noise(2048);

    let divergence = max_divergence(&mut direct, &mut recursive, &input);
    assert!(divergence <= 1e-6, "paths diverged by {}", divergence);
}

#[test]
fn test_quadrature_recursive_runs_on_one_pole() {
    let direct = FirFilter::sine(FS, FN, 80).unwrap();
    let recursive = EfficientFir::from_filter(&direct).unwrap();
    assert_eq!(recursive.n_poles(), 1);
    assert_eq!(recursive.window_len(), 80);
}

#[test]
fn test_sine_filter_recursive_agrees_on_tone() {
    let mut direct = FirFilter::sine(FS, FN, 80).unwrap();
    let mut recursive = EfficientFir::from_filter(&direct).unwrap();
    let input = test_signals::tone(FN, FS, 1.0, 0.25, 800);

    let divergence = max_divergence(&mut direct, &mut recursive, &input);
    assert!(divergence <= 1e-9, "paths diverged by {}", divergence);
}

#[test]
fn test_hartley_recursive_agrees_on_noise() {
    let mut direct = FirFilter::hartley(FS, FN, 0.7, 80).unwrap();
    let mut recursive = EfficientFir::from_filter(&direct).unwrap();
    let input = test_signals::white_noise(1024);

    let divergence = max_divergence(&mut direct, &mut recursive, &input);
    assert!(divergence <= 1e-9, "paths diverged by {}", divergence);
}

#[test]
fn test_gain_scales_recursive_output() {
    let direct = FirFilter::cosine(FS, FN, 80).unwrap();
    let mut scaled = EfficientFir::from_filter(&direct).unwrap();
    scaled.set_gain(2.0);
    let mut reference = EfficientFir::from_filter(&direct).unwrap();

    for &x in &test_signals::white_noise(256) {
        let y_scaled = scaled.process(x);
        let y_unit = reference.process(x);
        assert!((y_scaled - 2.0 * y_unit).abs() < 1e-12);
    }
}
