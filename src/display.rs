//! Drawing the analysis results on a bitmap display.

use crate::common::{Q15, Q15_SHIFT};

/// The drawing primitives the tuner needs from a display driver.
///
/// Coordinates are in pixels with the origin in the top left corner.
/// Nothing is expected to become visible before [`flush`](Self::flush).
pub trait DisplaySurface {
    fn clear(&mut self);
    /// Draws a vertical line through column `x` from row `y0` to row `y1`, inclusive.
    fn draw_vline(&mut self, x: u16, y0: u16, y1: u16);
    /// Draws `value` right-aligned as `digits` seven-segment digits.
    fn draw_digits(&mut self, x: u16, y: u16, value: i32, digits: u8, color: u8);
    fn draw_text(&mut self, x: u16, y: u16, text: &str);
    fn flush(&mut self);
}

/// Screen layout of the spectrum bars, the frequency readout and the pitch label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumView {
    /// Width of the bar area in pixels.
    pub width: u16,
    /// Height of the bar area in pixels. Bars grow upward from row `height - 1`.
    pub height: u16,
    /// The first magnitude bin drawn.
    pub first_bin: usize,
    pub digits_x: u16,
    pub digits_y: u16,
    pub digit_count: u8,
    pub digit_color: u8,
    pub label_x: u16,
    pub label_y: u16,
}

impl Default for SpectrumView {
    /// The layout of a 128x64 OLED: 128x48 bars, four digits in the top left
    /// corner and the label on the right.
    fn default() -> Self {
        SpectrumView {
            width: 128,
            height: 48,
            first_bin: 2,
            digits_x: 0,
            digits_y: 0,
            digit_count: 4,
            digit_color: 1,
            label_x: 100,
            label_y: 25,
        }
    }
}

impl SpectrumView {
    /// Draws one bar per bin from `first_bin` up to, but not including, the
    /// last bin of `magnitudes`, which is outside the peak search window.
    /// The bars are spread over the width of the bar area and full scale
    /// fills its height.
    pub fn draw_bars<D: DisplaySurface>(&self, surface: &mut D, magnitudes: &[Q15]) {
        if magnitudes.len() <= self.first_bin + 1 || self.height == 0 {
            return;
        }
        let bar_count = magnitudes.len() - 1 - self.first_bin;
        let bottom = u32::from(self.height - 1);
        let bars = &magnitudes[self.first_bin..magnitudes.len() - 1];
        for (offset, magnitude) in bars.iter().enumerate() {
            let x = offset * usize::from(self.width) / bar_count;
            if x >= usize::from(self.width) {
                continue;
            }
            let magnitude = i32::from(*magnitude).max(0) as u32;
            let bar_height = ((magnitude * bottom) >> Q15_SHIFT).min(bottom);
            surface.draw_vline(x as u16, bottom as u16, (bottom - bar_height) as u16);
        }
    }

    /// Redraws the whole screen: bars, frequency and label.
    pub fn render<D: DisplaySurface>(
        &self,
        surface: &mut D,
        magnitudes: &[Q15],
        display_frequency: i32,
        label: &str,
    ) {
        surface.clear();
        self.draw_bars(surface, magnitudes);
        surface.draw_digits(
            self.digits_x,
            self.digits_y,
            display_frequency,
            self.digit_count,
            self.digit_color,
        );
        surface.draw_text(self.label_x, self.label_y, label);
        surface.flush();
    }
}
