//! Maps a frequency to one of a small table of reference pitches.

/// The label shown when a frequency matches no reference pitch.
pub const UNMATCHED_LABEL: &str = "--";

/// A pitch to tune to, e.g. one string of an instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePitch {
    pub name: &'static str,
    /// Target frequency in Hz.
    pub frequency: f32,
    /// Half-width of the accepted band, in percent of `frequency`.
    pub tolerance_percent: f32,
}

/// Standard violin strings, lowest first, each with a 10 % band.
pub const VIOLIN_STRINGS: [ReferencePitch; 4] = [
    ReferencePitch::new("G", 196.00, 10.0),
    ReferencePitch::new("D", 293.66, 10.0),
    ReferencePitch::new("A", 440.00, 10.0),
    ReferencePitch::new("E", 659.25, 10.0),
];

impl ReferencePitch {
    pub const fn new(name: &'static str, frequency: f32, tolerance_percent: f32) -> Self {
        ReferencePitch {
            name,
            frequency,
            tolerance_percent,
        }
    }

    /// The inclusive band `(low, high)` of frequencies matching this pitch.
    pub fn band(&self) -> (f32, f32) {
        let tolerance = self.frequency * self.tolerance_percent / 100.0;
        (self.frequency - tolerance, self.frequency + tolerance)
    }

    pub fn contains(&self, frequency: f32) -> bool {
        let (low, high) = self.band();
        frequency >= low && frequency <= high
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.frequency.is_finite()
            && self.frequency > 0.0
            && self.tolerance_percent.is_finite()
            && self.tolerance_percent >= 0.0
    }
}

/// The outcome of classifying a frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// The frequency lies in the band of the reference pitch at `index`.
    Matched { index: usize, name: &'static str },
    /// The frequency lies outside every band.
    Unmatched,
}

impl Classification {
    /// The text to display: the pitch name, or [`UNMATCHED_LABEL`].
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Matched { name, .. } => *name,
            Classification::Unmatched => UNMATCHED_LABEL,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Classification::Matched { .. })
    }
}

/// Returns the first pitch, in table order, whose band contains `frequency`.
///
/// If bands overlap, the earlier entry wins, so tables must list the intended
/// pitch first in ambiguous regions.
pub fn classify(frequency: f32, pitches: &[ReferencePitch]) -> Classification {
    pitches
        .iter()
        .position(|pitch| pitch.contains(frequency))
        .map_or(Classification::Unmatched, |index| Classification::Matched {
            index,
            name: pitches[index].name,
        })
}
