use num_complex::Complex;

use crate::common::{mul, WindowTable, Q15};

/// Applies `window` to `frame` and writes the result to the real parts of
/// `result`, clearing the imaginary parts.
///
/// # Panics
///
/// Panics if the frame, window and result lengths differ.
pub fn prepare_frame(frame: &[Q15], window: &WindowTable, result: &mut [Complex<Q15>]) {
    if frame.len() != window.len() || result.len() != frame.len() {
        panic!(
            "Frame length {}, window length {} and result length {} must match",
            frame.len(),
            window.len(),
            result.len()
        )
    }
    for ((value, sample), coefficient) in result
        .iter_mut()
        .zip(frame.iter())
        .zip(window.coefficients().iter())
    {
        *value = Complex::new(mul(*sample, *coefficient), 0);
    }
}
