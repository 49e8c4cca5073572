//! Initialization-time configuration.

use crate::classifier::{ReferencePitch, VIOLIN_STRINGS};
use crate::common::{validate_fft_len, Q15};
use crate::error::ConfigError;

/// Frame length of the violin tuner firmware.
pub const DEFAULT_FRAME_LEN: usize = 256;
/// Sample rate of the violin tuner firmware, chosen so that one bin is 143 Hz wide.
pub const DEFAULT_SAMPLE_RATE: f32 = 143.0 * 256.0;
/// Tolerance of each violin string, in percent of its frequency.
pub const DEFAULT_TOLERANCE_PERCENT: f32 = 10.0;

/// Everything a [`Tuner`](crate::Tuner) needs to know up front.
///
/// None of these values can change once the tuner is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunerConfig {
    /// The number of samples N in an analysis frame. A power of two.
    pub frame_len: usize,
    /// The rate at which samples are delivered, in Hz.
    pub sample_rate: f32,
    /// The lowest bin considered by the peak search. Bins below it (DC and
    /// the near-DC region) never win, but bin `min_peak_bin - 1` is still used
    /// as the left interpolation neighbour.
    pub min_peak_bin: usize,
    /// Left shift applied to magnitudes to restore the range lost to the
    /// transform's 1/N scaling and the window's coherent gain.
    pub magnitude_gain_shift: u32,
    /// Frames whose peak magnitude is below this value are never classified.
    pub silence_floor: Q15,
    /// Reference pitches, checked in order.
    pub pitches: &'static [ReferencePitch],
}

impl Default for TunerConfig {
    fn default() -> Self {
        TunerConfig {
            frame_len: DEFAULT_FRAME_LEN,
            sample_rate: DEFAULT_SAMPLE_RATE,
            min_peak_bin: 2,
            magnitude_gain_shift: 2,
            silence_floor: 8,
            pitches: &VIOLIN_STRINGS,
        }
    }
}

impl TunerConfig {
    /// The number of valid magnitude bins, N/2.
    pub fn bin_count(&self) -> usize {
        self.frame_len / 2
    }

    /// The width of one bin in Hz.
    pub fn bin_width(&self) -> f32 {
        self.sample_rate / (self.frame_len as f32)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fft_len(self.frame_len)?;
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate);
        }
        // Candidates live in [min_peak_bin, N/2 - 1) and each needs a left neighbour.
        if self.min_peak_bin == 0 || self.min_peak_bin + 1 >= self.bin_count() {
            return Err(ConfigError::InvalidPeakSearch {
                min_bin: self.min_peak_bin,
                bin_count: self.bin_count(),
            });
        }
        if self.magnitude_gain_shift > 14 {
            return Err(ConfigError::InvalidGainShift {
                shift: self.magnitude_gain_shift,
            });
        }
        if self.pitches.is_empty() {
            return Err(ConfigError::EmptyPitchTable);
        }
        for (index, pitch) in self.pitches.iter().enumerate() {
            if !pitch.is_valid() {
                return Err(ConfigError::InvalidReferencePitch { index });
            }
        }
        Ok(())
    }
}
