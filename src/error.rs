use core::fmt;

/// Reasons a [`TunerConfig`](crate::TunerConfig) or one of the pipeline
/// stages built from it can be rejected.
///
/// These are only ever returned at construction time. Once a
/// [`Tuner`](crate::Tuner) exists, processing a frame cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The frame length is not a power of two.
    FrameLengthNotPowerOfTwo { len: usize },
    /// The frame length is a power of two, but outside the range the
    /// transform kernels support.
    UnsupportedFrameLength { len: usize, min: usize, max: usize },
    /// The sample rate is not a finite, positive number.
    InvalidSampleRate,
    /// The first peak search bin leaves no room for the interpolation
    /// neighbours inside `[0, N/2)`.
    InvalidPeakSearch { min_bin: usize, bin_count: usize },
    /// The magnitude gain shift would discard every significant bit.
    InvalidGainShift { shift: u32 },
    /// The reference pitch table has no entries.
    EmptyPitchTable,
    /// A reference pitch has a non-positive frequency or a negative tolerance.
    InvalidReferencePitch { index: usize },
    /// A transform kernel was built for a different length than the frame.
    FftLengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FrameLengthNotPowerOfTwo { len } => {
                write!(f, "frame length {} is not a power of two", len)
            }
            ConfigError::UnsupportedFrameLength { len, min, max } => write!(
                f,
                "frame length {} is outside the supported range {}..={}",
                len, min, max
            ),
            ConfigError::InvalidSampleRate => {
                write!(f, "sample rate must be a finite positive number")
            }
            ConfigError::InvalidPeakSearch { min_bin, bin_count } => write!(
                f,
                "peak search cannot start at bin {} with {} magnitude bins",
                min_bin, bin_count
            ),
            ConfigError::InvalidGainShift { shift } => {
                write!(f, "magnitude gain shift {} is larger than 14", shift)
            }
            ConfigError::EmptyPitchTable => write!(f, "reference pitch table is empty"),
            ConfigError::InvalidReferencePitch { index } => {
                write!(f, "reference pitch at index {} is invalid", index)
            }
            ConfigError::FftLengthMismatch { expected, actual } => write!(
                f,
                "transform length {} does not match frame length {}",
                actual, expected
            ),
        }
    }
}
