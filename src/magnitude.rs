use num_complex::Complex;

use crate::common::{sqrt, Q15, Q15_MAX, Q15_SHIFT};

/// The magnitude of one complex Q15 value, in Q15, multiplied by `2^gain_shift`
/// and saturated at [`Q15_MAX`].
#[inline]
pub fn magnitude(value: Complex<Q15>, gain_shift: u32) -> Q15 {
    let re = i32::from(value.re);
    let im = i32::from(value.im);
    // Each square is at most 2^30, so the sum fits a u32.
    let power = ((re * re) as u32 + (im * im) as u32) >> Q15_SHIFT;
    let scaled = sqrt(power) << gain_shift;
    if scaled > Q15_MAX as u32 {
        Q15_MAX
    } else {
        scaled as Q15
    }
}

/// Computes the magnitudes of the first `result.len()` bins of `spectrum`.
///
/// # Panics
///
/// Panics if `result` is longer than `spectrum`.
pub fn complex_magnitudes(spectrum: &[Complex<Q15>], gain_shift: u32, result: &mut [Q15]) {
    if result.len() > spectrum.len() {
        panic!(
            "Cannot compute {} magnitudes from {} bins",
            result.len(),
            spectrum.len()
        )
    }
    for (magnitude_out, value) in result.iter_mut().zip(spectrum.iter()) {
        *magnitude_out = magnitude(*value, gain_shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Q15_MIN;

    #[test]
    fn test_known_magnitudes() {
        // |0.3 + 0.4i| = 0.5, less the bit lost by the >> 15 reduction
        assert_eq!(magnitude(Complex::new(9830, 13107), 0), 16383);
        assert_eq!(magnitude(Complex::new(-9830, -13107), 0), 16383);
        assert_eq!(magnitude(Complex::new(0, 0), 2), 0);
        // 0.5 << 1 = 1.0 saturates
        assert_eq!(magnitude(Complex::new(16384, 0), 1), Q15_MAX);
        // 0.125 << 2 = 0.5
        assert_eq!(magnitude(Complex::new(0, 4096), 2), 16384);
    }

    #[test]
    fn test_extremes_do_not_overflow() {
        for re in [Q15_MIN, Q15_MAX, 0, -1, 1] {
            for im in [Q15_MIN, Q15_MAX, 0, -1, 1] {
                for shift in 0..=14 {
                    let value = magnitude(Complex::new(re, im), shift);
                    assert!(value >= 0);
                }
            }
        }
        assert_eq!(magnitude(Complex::new(Q15_MIN, Q15_MIN), 0), Q15_MAX);
        assert_eq!(magnitude(Complex::new(Q15_MAX, Q15_MAX), 0), Q15_MAX);
    }

    #[test]
    fn test_small_values() {
        // re^2 >> 15 truncates tiny bins to zero
        assert_eq!(magnitude(Complex::new(100, 0), 0), 0);
        // 182^2 >> 15 = 1, sqrt(1 << 15) = 181.02
        assert_eq!(magnitude(Complex::new(182, 0), 0), 181);
    }

    #[test]
    fn test_complex_magnitudes_uses_lower_half() {
        let spectrum = [
            Complex::new(16384, 0),
            Complex::new(0, -8192),
            Complex::new(4096, 0),
            Complex::new(Q15_MAX, 0),
        ];
        let mut result = [0 as Q15; 2];
        complex_magnitudes(&spectrum, 0, &mut result);
        assert_eq!(result, [16384, 8192]);
    }

    #[test]
    #[should_panic]
    fn test_result_too_long() {
        let spectrum = [Complex::new(0 as Q15, 0); 4];
        let mut result = [0 as Q15; 8];
        complex_magnitudes(&spectrum, 2, &mut result);
    }
}
