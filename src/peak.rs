use crate::common::Q15;

/// The dominant bin of a magnitude spectrum, refined below bin resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakEstimate {
    /// The index of the largest magnitude in the search window.
    pub bin: usize,
    /// The magnitude at `bin`.
    pub magnitude: Q15,
    /// The offset of the interpolated maximum from `bin`, in bins. Always
    /// within [-0.5, 0.5].
    pub offset: f32,
    /// The interpolated peak frequency in Hz.
    pub frequency: f32,
}

impl PeakEstimate {
    /// The interpolated peak position, in bins.
    pub fn refined_bin(&self) -> f32 {
        (self.bin as f32) + self.offset
    }

    /// The frequency rounded to the nearest integer, for display.
    pub fn display_frequency(&self) -> i32 {
        (self.frequency + 0.5) as i32
    }
}

/// Returns the index of the largest magnitude in `[min_bin, magnitudes.len() - 1)`.
/// Ties go to the lowest index.
///
/// # Panics
///
/// Panics if the search window is empty or `min_bin` is zero.
pub fn find_peak_bin(magnitudes: &[Q15], min_bin: usize) -> usize {
    if min_bin == 0 || min_bin + 1 >= magnitudes.len() {
        panic!(
            "Cannot search for a peak from bin {} in {} magnitudes",
            min_bin,
            magnitudes.len()
        )
    }
    let end = magnitudes.len() - 1;
    let mut peak_bin = min_bin;
    for bin in (min_bin + 1)..end {
        if magnitudes[bin] > magnitudes[peak_bin] {
            peak_bin = bin;
        }
    }
    peak_bin
}

/// Returns the x value of the vertex of the parabola through
/// (-1, left), (0, center), (1, right).
///
/// A flat or straight triple has no vertex and gives 0. The result is always
/// within [-0.5, 0.5]. When `center` is a local maximum the vertex already
/// lies within half a bin; otherwise (a peak at the edge of the search window) it is
/// clamped to half a bin.
pub fn parabolic_offset(left: Q15, center: Q15, right: Q15) -> f32 {
    let left = left as f32;
    let center = center as f32;
    let right = right as f32;
    let denominator = left - 2.0 * center + right;
    if denominator == 0.0 {
        return 0.0;
    }
    let offset = 0.5 * (left - right) / denominator;
    offset.max(-0.5).min(0.5)
}

/// Finds the dominant bin and refines its position with parabolic interpolation.
///
/// `frame_len` is the transform length N, so the bin width is
/// `sample_rate / frame_len`.
///
/// # Panics
///
/// Panics if the search window is empty or `min_bin` is zero.
pub fn estimate_peak(
    magnitudes: &[Q15],
    min_bin: usize,
    sample_rate: f32,
    frame_len: usize,
) -> PeakEstimate {
    let bin = find_peak_bin(magnitudes, min_bin);
    let offset = parabolic_offset(magnitudes[bin - 1], magnitudes[bin], magnitudes[bin + 1]);
    let frequency = ((bin as f32) + offset) * (sample_rate / (frame_len as f32));
    PeakEstimate {
        bin,
        magnitude: magnitudes[bin],
        offset,
        frequency,
    }
}
