use micro_tuner::DisplaySurface;

/// A monochrome display surface rendered as text, for running the tuner on a host.
///
/// Lines are drawn into a pixel buffer. Digits and text are kept as strings
/// together with their positions. [`flush`](DisplaySurface::flush) captures
/// what has been drawn so far, which can then be inspected or printed.
pub struct TextDisplay {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
    digits: Option<(u16, u16, String)>,
    texts: Vec<(u16, u16, String)>,
    flushed: Option<String>,
    flush_count: usize,
}

impl TextDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        TextDisplay {
            width,
            height,
            pixels: vec![false; width * height],
            digits: None,
            texts: Vec::new(),
            flushed: None,
            flush_count: 0,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    /// The number of lit pixels in column `x`.
    pub fn column_height(&self, x: usize) -> usize {
        (0..self.height).filter(|y| self.pixel(x, *y)).count()
    }

    /// The digits drawn since the last clear, as they would appear on screen.
    pub fn digits(&self) -> Option<&str> {
        self.digits.as_ref().map(|(_, _, digits)| digits.as_str())
    }

    /// The most recent text drawn since the last clear.
    pub fn text(&self) -> Option<&str> {
        self.texts.last().map(|(_, _, text)| text.as_str())
    }

    /// The screen as of the last flush.
    pub fn flushed(&self) -> Option<&str> {
        self.flushed.as_deref()
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// Renders the pixel buffer, `vertical_step` rows per line of text,
    /// followed by the digits and text.
    pub fn render(&self, vertical_step: usize) -> String {
        let step = vertical_step.max(1);
        let mut result = String::new();
        for row in (0..self.height).step_by(step) {
            for x in 0..self.width {
                let lit = (row..(row + step).min(self.height)).any(|y| self.pixel(x, y));
                result.push(if lit { '|' } else { ' ' });
            }
            result.push('\n');
        }
        if let Some((_, _, digits)) = &self.digits {
            result.push_str(digits);
        }
        for (_, _, text) in self.texts.iter() {
            result.push_str("  ");
            result.push_str(text);
        }
        result.push('\n');
        result
    }
}

impl DisplaySurface for TextDisplay {
    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = false);
        self.digits = None;
        self.texts.clear();
    }

    fn draw_vline(&mut self, x: u16, y0: u16, y1: u16) {
        let x = x as usize;
        if x >= self.width || self.height == 0 {
            return;
        }
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in (top as usize)..=(bottom as usize).min(self.height - 1) {
            self.pixels[y * self.width + x] = true;
        }
    }

    fn draw_digits(&mut self, x: u16, y: u16, value: i32, digits: u8, _color: u8) {
        let digits = digits as usize;
        let mut text = format!("{:>width$}", value, width = digits);
        // A seven segment display shows the lowest digits of a value that does not fit.
        if text.len() > digits {
            text = text[text.len() - digits..].to_string();
        }
        self.digits = Some((x, y, text));
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) {
        self.texts.push((x, y, text.to_string()));
    }

    fn flush(&mut self) {
        self.flushed = Some(self.render(1));
        self.flush_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vline() {
        let mut display = TextDisplay::new(4, 5);
        display.draw_vline(1, 4, 2);
        display.draw_vline(3, 4, 4);
        display.draw_vline(9, 4, 0);
        assert_eq!(display.column_height(0), 0);
        assert_eq!(display.column_height(1), 3);
        assert_eq!(display.column_height(3), 1);
        assert!(display.pixel(1, 2));
        assert!(!display.pixel(1, 1));
    }

    #[test]
    fn test_digits_and_text() {
        let mut display = TextDisplay::new(4, 2);
        display.draw_digits(0, 0, 196, 4, 1);
        assert_eq!(display.digits(), Some(" 196"));
        display.draw_digits(0, 0, 12345, 4, 1);
        assert_eq!(display.digits(), Some("2345"));
        display.draw_text(100, 25, "G");
        assert_eq!(display.text(), Some("G"));
        display.clear();
        assert_eq!(display.digits(), None);
        assert_eq!(display.text(), None);
    }

    #[test]
    fn test_flush_captures_screen() {
        let mut display = TextDisplay::new(3, 2);
        display.draw_vline(0, 1, 0);
        display.draw_digits(0, 0, 7, 2, 1);
        display.draw_text(0, 0, "--");
        assert_eq!(display.flushed(), None);
        display.flush();
        assert_eq!(display.flushed(), Some("|  \n|  \n 7  --\n"));
        assert_eq!(display.flush_count(), 1);
        assert_eq!(display.render(2), "|  \n 7  --\n");
    }
}
