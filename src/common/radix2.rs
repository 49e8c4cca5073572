//! Fixed point radix-2 FFT.
//!
//! Decimation in frequency, natural order in, bit-reversed order out followed
//! by a reordering pass. Every stage halves its inputs before the butterfly,
//! which is the same block scaling CMSIS `arm_cfft_q15` uses: after log2(N)
//! stages the output is the DFT divided by N and no add can overflow.

use alloc::{boxed::Box, vec::Vec};
use micromath::F32Ext;
use num_complex::Complex;

use super::fft::{validate_fft_len, ComplexFft};
use super::q15::{from_f32, saturate, Q15, Q15_SHIFT};
use crate::error::ConfigError;

/// Native Q15 FFT kernel. The default kernel of a [`Tuner`](crate::Tuner).
pub struct Radix2Q15 {
    len: usize,
    /// exp(-2 pi i k / N) for k in [0, N/2), in Q15.
    twiddles: Box<[Complex<Q15>]>,
}

impl Radix2Q15 {
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        validate_fft_len(len)?;
        let step = 2.0 * core::f32::consts::PI / (len as f32);
        let twiddles: Vec<Complex<Q15>> = (0..len / 2)
            .map(|k| {
                let angle = step * (k as f32);
                Complex::new(from_f32(F32Ext::cos(angle)), from_f32(-F32Ext::sin(angle)))
            })
            .collect();
        Ok(Radix2Q15 {
            len,
            twiddles: twiddles.into_boxed_slice(),
        })
    }
}

impl ComplexFft for Radix2Q15 {
    fn len(&self) -> usize {
        self.len
    }

    fn forward(&mut self, buffer: &mut [Complex<Q15>]) {
        if buffer.len() != self.len {
            panic!(
                "Got fft buffer of length {}, expected {}.",
                buffer.len(),
                self.len
            )
        }

        let mut half = self.len / 2;
        let mut twiddle_stride = 1;
        while half >= 1 {
            for block in (0..self.len).step_by(2 * half) {
                for j in 0..half {
                    let a = block + j;
                    let b = a + half;
                    // scale inputs
                    let x = Complex::new(buffer[a].re >> 1, buffer[a].im >> 1);
                    let y = Complex::new(buffer[b].re >> 1, buffer[b].im >> 1);
                    // add
                    buffer[a] = Complex::new(x.re + y.re, x.im + y.im);
                    // sub and cmul
                    let dr = i32::from(x.re) - i32::from(y.re);
                    let di = i32::from(x.im) - i32::from(y.im);
                    let w = self.twiddles[j * twiddle_stride];
                    let (wr, wi) = (i32::from(w.re), i32::from(w.im));
                    buffer[b] = Complex::new(
                        saturate((dr * wr - di * wi) >> Q15_SHIFT),
                        saturate((dr * wi + di * wr) >> Q15_SHIFT),
                    );
                }
            }
            half >>= 1;
            twiddle_stride <<= 1;
        }

        bit_reverse_permute(buffer);
    }
}

fn bit_reverse_permute<T>(buffer: &mut [T]) {
    let len = buffer.len();
    let mut j = 0usize;
    for i in 1..len {
        let mut bit = len >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            buffer.swap(i, j);
        }
    }
}
