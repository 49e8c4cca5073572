//! Precomputed [Hann window](https://en.wikipedia.org/wiki/Window_function#Hann_and_Hamming_windows)
//! coefficients in Q15.

use alloc::{boxed::Box, vec};

use super::q15::{from_f32, Q15};

/// Q15 Hann window coefficients for one analysis frame length.
///
/// The table is built once and only read afterwards. The same length always
/// yields the same coefficients.
pub struct WindowTable {
    coefficients: Box<[Q15]>,
}

impl WindowTable {
    /// Builds the symmetric Hann window `0.5 - 0.5 cos(2 pi i / (len - 1))`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is less than 2.
    pub fn hann(len: usize) -> Self {
        if len < 2 {
            panic!("Window length must be at least 2")
        }
        let mut coefficients = vec![0 as Q15; len].into_boxed_slice();
        for (index, coefficient) in coefficients.iter_mut().enumerate() {
            *coefficient = from_f32(hann_value(index, len));
        }
        WindowTable { coefficients }
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn coefficients(&self) -> &[Q15] {
        &self.coefficients
    }
}

/// Evaluates the Hann window at `index` without calling any trig function.
///
/// On each half of the window, the Hann shape is `0.5 + 0.5 sin(0.5 pi x)`
/// for x in [-1, 1]. sin(0.5 * pi * x) is approximated with a max error below
/// 0.001 and exactly matching endpoints as ax^5 + bx^3 + cx, where
/// a = pi / 2 - 1.5, b = 2.5 - pi and c = pi / 2.
fn hann_value(index: usize, len: usize) -> f32 {
    use core::f32::consts::PI;
    let a = 0.5 * (PI / 2. - 1.5);
    let b = 0.5 * (2.5 - PI);
    let c = 0.5 * PI / 2.;
    let d = 0.5;

    // Fold onto the left half so that both halves are bit-identical.
    let folded = if 2 * index > len - 1 {
        len - 1 - index
    } else {
        index
    };
    let x = 4.0 * (folded as f32) / ((len - 1) as f32) - 1.0;
    let x3 = x * x * x;
    let x5 = x3 * x * x;
    a * x5 + b * x3 + c * x + d
}
