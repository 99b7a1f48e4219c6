//! Recursive radix-2 complex FFT with per-level 0.5 normalization.
//!
//! Classic decimation-in-time Cooley-Tukey over [`Complex64`] samples: the
//! sequence splits into even- and odd-indexed halves, each half transforms
//! recursively, and twiddle factors `exp(±iπk/(n/2))` recombine the results.
//!
//! # Normalization
//!
//! Every recursive merge scales the combined pair by 0.5 regardless of
//! direction, so a transform of length `n` is `1/n` times the textbook
//! unnormalized DFT — in **both** the forward and inverse directions. A
//! forward transform followed by an inverse one therefore reconstructs the
//! input scaled by `1/n`. This convention is unusual but deliberate;
//! downstream consumers compensate for it, so it must not be changed.
//!
//! Non-power-of-two lengths are rejected up front rather than miscomputed.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::errors::{validate_power_of_two, NumericError, NumericResult};

/// Discrete Fourier transform of `n` samples drawn from `input` at stride
/// `skip`, forward or inverse.
///
/// Returns a freshly allocated output of length `n`; the input is untouched.
/// `n` must be a nonzero power of two, `skip` nonzero, and `input` long
/// enough to supply sample `(n-1) * skip`.
///
/// ```rust
/// use num_complex::Complex64;
/// use quadnum::fft;
///
/// let x = vec![Complex64::new(1.0, 0.0); 4];
/// let spectrum = fft(&x, 4, 1, false)?;
/// // A constant signal concentrates in bin 0; the 1/n scaling leaves 1.0.
/// assert!((spectrum[0].re - 1.0).abs() < 1e-15);
/// assert!(spectrum[1].norm() < 1e-15);
/// # quadnum::NumericResult::Ok(())
/// ```
pub fn fft(
    input: &[Complex64],
    n: usize,
    skip: usize,
    inverse: bool,
) -> NumericResult<Vec<Complex64>> {
    validate_power_of_two(n)?;
    if skip == 0 {
        return Err(NumericError::InvalidParameter {
            parameter: "skip".to_string(),
            value: 0.0,
            constraint: "nonzero stride".to_string(),
        });
    }
    if input.len() < (n - 1) * skip + 1 {
        return Err(NumericError::ShortInput {
            len: input.len(),
            n,
            skip,
        });
    }
    Ok(fft_rec(input, n, skip, inverse))
}

/// The recursion proper; preconditions established by [`fft`].
fn fft_rec(input: &[Complex64], n: usize, skip: usize, inverse: bool) -> Vec<Complex64> {
    if n == 1 {
        return vec![input[0]];
    }

    let half = n / 2;
    let evens = fft_rec(input, half, skip * 2, inverse);
    let odds = fft_rec(&input[skip..], half, skip * 2, inverse);

    let sign = if inverse { 1.0 } else { -1.0 };
    let mut out = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..half {
        let twiddle = Complex64::from_polar(1.0, sign * PI * k as f64 / half as f64);
        let t = twiddle * odds[k];
        out[k] = 0.5 * (evens[k] + t);
        out[k + half] = 0.5 * (evens[k] - t);
    }
    out
}
