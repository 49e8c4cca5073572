//! Q15 fixed-point helpers.
//!
//! A Q15 value is an `i16` representing a fraction in [-1, 1) scaled by 2^15.
//! Products of two Q15 values are formed in `i32` and shifted back down, so
//! none of the helpers below can overflow.

/// A signed Q15 fixed-point value.
pub type Q15 = i16;

/// The number of fractional bits in a [`Q15`] value.
pub const Q15_SHIFT: u32 = 15;
/// The largest representable Q15 value, just below 1.0.
pub const Q15_MAX: Q15 = i16::MAX;
/// The smallest representable Q15 value, -1.0.
pub const Q15_MIN: Q15 = i16::MIN;

/// Clamps a widened intermediate to the Q15 range.
#[inline]
pub fn saturate(value: i32) -> Q15 {
    if value > Q15_MAX as i32 {
        Q15_MAX
    } else if value < Q15_MIN as i32 {
        Q15_MIN
    } else {
        value as Q15
    }
}

/// Multiplies two Q15 values, truncating towards negative infinity
/// and saturating the single overflowing case (-1 * -1).
#[inline]
pub fn mul(a: Q15, b: Q15) -> Q15 {
    saturate((i32::from(a) * i32::from(b)) >> Q15_SHIFT)
}

/// Converts a float in [-1, 1] to Q15, rounding to nearest and saturating.
#[inline]
pub fn from_f32(value: f32) -> Q15 {
    let scaled = value * 32768.0;
    let rounded = if scaled >= 0.0 {
        scaled + 0.5
    } else {
        scaled - 0.5
    };
    if rounded >= Q15_MAX as f32 {
        Q15_MAX
    } else if rounded <= Q15_MIN as f32 {
        Q15_MIN
    } else {
        rounded as Q15
    }
}

/// Converts a Q15 value to a float in [-1, 1).
#[inline]
pub fn to_f32(value: Q15) -> f32 {
    value as f32 / 32768.0
}

/// Converts an unsigned, offset-binary ADC reading (mid-scale = 0x8000) to a
/// zero-centered Q15 sample. Readings from converters with fewer than 16 bits
/// are expected to be left-justified.
#[inline]
pub fn from_offset_binary(raw: u16) -> Q15 {
    (raw ^ 0x8000) as Q15
}

/// Integer square root, rounded down.
pub fn isqrt(value: u32) -> u32 {
    if value < 2 {
        return value;
    }
    // Bitwise method: one result bit per iteration, no division.
    let mut remainder = value;
    let mut result = 0u32;
    let mut bit = 1u32 << 30;
    while bit > remainder {
        bit >>= 2;
    }
    while bit != 0 {
        if remainder >= result + bit {
            remainder -= result + bit;
            result += bit << 1;
        }
        result >>= 1;
        bit >>= 2;
    }
    result
}

/// Square root of a non-negative Q15 value held in a `u32`, which may exceed
/// 1.0 (up to 2.0 for the magnitude of a full scale complex value).
/// The result is in Q15, rounded to nearest.
pub fn sqrt(value: u32) -> u32 {
    // sqrt(v / 2^15) * 2^15 == sqrt(v * 2^15). v < 2^17 keeps the shift in range.
    let scaled = value.min((1 << 17) - 1) << Q15_SHIFT;
    let root = isqrt(scaled);
    // (root + 0.5)^2 = root^2 + root + 0.25
    if scaled - root * root > root {
        root + 1
    } else {
        root
    }
}
