//! Fixed point building blocks shared by the pipeline stages.

mod fft;
mod q15;
mod radix2;
mod window_table;

pub use fft::{validate_fft_len, ComplexFft, MicrofftQ15, MAX_FFT_LEN, MIN_FFT_LEN};
pub use q15::{
    from_f32, from_offset_binary, isqrt, mul, saturate, sqrt, to_f32, Q15, Q15_MAX, Q15_MIN,
    Q15_SHIFT,
};
pub use radix2::Radix2Q15;
pub use window_table::WindowTable;
