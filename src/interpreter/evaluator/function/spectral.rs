use rustfft::{FftPlanner, num_complex::Complex};

/// Computes the magnitude spectrum `|X_k|` of a real series.
///
/// The forward transform is unnormalised,
/// `X_k = sum_n x_n * e^(-2πi·k·n/N)`. The output has the same length as the
/// input; an empty input yields an empty spectrum.
///
/// # Example
/// ```
/// use tracecalc::interpreter::evaluator::function::spectral::magnitude_spectrum;
///
/// let spectrum = magnitude_spectrum(&[1.0, 1.0, 1.0, 1.0]);
/// assert!((spectrum[0] - 4.0).abs() < 1e-12);
/// assert!(spectrum[1..].iter().all(|m| m.abs() < 1e-12));
/// ```
#[must_use]
pub fn magnitude_spectrum(samples: &[f64]) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }

    let fft = FftPlanner::<f64>::new().plan_fft_forward(samples.len());
    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    buffer.iter().map(|c| c.norm()).collect()
}

