//! Complex forward transforms on Q15 data.
//!
//! Every kernel follows the same scaling convention: the output is the
//! discrete Fourier transform of the input divided by the transform length.
//! Dividing by N keeps every intermediate inside the Q15 range, and the
//! magnitude stage compensates for it with a fixed gain.

use core::convert::TryInto;

use alloc::{boxed::Box, vec};
use microfft::Complex32;
use num_complex::Complex;

use super::q15::{from_f32, to_f32, Q15};
use crate::error::ConfigError;

/// The smallest supported transform length.
pub const MIN_FFT_LEN: usize = 16;
/// The largest supported transform length.
pub const MAX_FFT_LEN: usize = 4096;

/// Checks that `len` is a power of two the kernels can transform.
pub fn validate_fft_len(len: usize) -> Result<(), ConfigError> {
    if !len.is_power_of_two() {
        return Err(ConfigError::FrameLengthNotPowerOfTwo { len });
    }
    if len < MIN_FFT_LEN || len > MAX_FFT_LEN {
        return Err(ConfigError::UnsupportedFrameLength {
            len,
            min: MIN_FFT_LEN,
            max: MAX_FFT_LEN,
        });
    }
    Ok(())
}

/// A forward complex FFT on interleaved Q15 data, in place, with bin 0 = DC.
pub trait ComplexFft {
    /// The transform length this kernel was built for.
    fn len(&self) -> usize;

    /// Replaces `buffer` with its forward transform divided by `len()`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer.len() != self.len()`.
    fn forward(&mut self, buffer: &mut [Complex<Q15>]);
}

/// Runs the `microfft` complex FFT on Q15 data.
///
/// The data is converted to `f32`, transformed, divided by the length and
/// converted back, so the result follows the same convention as
/// [`Radix2Q15`](super::Radix2Q15). Useful on parts with a floating point unit.
pub struct MicrofftQ15 {
    scratch: Box<[Complex32]>,
}

impl MicrofftQ15 {
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        validate_fft_len(len)?;
        Ok(MicrofftQ15 {
            scratch: vec![Complex32::new(0., 0.); len].into_boxed_slice(),
        })
    }
}

impl ComplexFft for MicrofftQ15 {
    fn len(&self) -> usize {
        self.scratch.len()
    }

    fn forward(&mut self, buffer: &mut [Complex<Q15>]) {
        if buffer.len() != self.scratch.len() {
            panic!(
                "Got fft buffer of length {}, expected {}.",
                buffer.len(),
                self.scratch.len()
            )
        }
        for (scratch, value) in self.scratch.iter_mut().zip(buffer.iter()) {
            *scratch = Complex32::new(to_f32(value.re), to_f32(value.im));
        }

        complex_fft_in_place(&mut self.scratch);

        let scale = 1.0 / (self.scratch.len() as f32);
        for (value, scratch) in buffer.iter_mut().zip(self.scratch.iter()) {
            *value = Complex::new(from_f32(scratch.re * scale), from_f32(scratch.im * scale));
        }
    }
}

fn run_fixed_size<const N: usize>(
    buffer: &mut [Complex32],
    fft: fn(&mut [Complex32; N]) -> &mut [Complex32; N],
) {
    let buffer: Result<&mut [Complex32; N], _> = buffer.try_into();
    if let Ok(buffer) = buffer {
        let _ = fft(buffer);
    }
}

/// Performs an in-place complex FFT on a given buffer.
fn complex_fft_in_place(buffer: &mut [Complex32]) {
    let fft_size = buffer.len();
    match fft_size {
        16 => run_fixed_size(buffer, microfft::complex::cfft_16),
        32 => run_fixed_size(buffer, microfft::complex::cfft_32),
        64 => run_fixed_size(buffer, microfft::complex::cfft_64),
        128 => run_fixed_size(buffer, microfft::complex::cfft_128),
        256 => run_fixed_size(buffer, microfft::complex::cfft_256),
        512 => run_fixed_size(buffer, microfft::complex::cfft_512),
        1024 => run_fixed_size(buffer, microfft::complex::cfft_1024),
        2048 => run_fixed_size(buffer, microfft::complex::cfft_2048),
        4096 => run_fixed_size(buffer, microfft::complex::cfft_4096),
        _ => panic!("Unsupported fft size {}", fft_size),
    }
}
