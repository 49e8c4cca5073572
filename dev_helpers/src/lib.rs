mod text_display;
mod tone;
mod wav;

pub use text_display::TextDisplay;
pub use tone::{offset_binary, raw_tone, sine};
pub use wav::{read_wav, write_wav};

/// Formats the distance between `frequency` and `target` in cents,
/// e.g. "+07 cents".
pub fn cents_to_string(frequency: f32, target: f32) -> String {
    let cents = (1200.0 * (frequency / target).log2()).round() as i32;
    let sign = if cents > 0 { "+" } else { "-" };
    format!("{}{:02} cents", sign, cents.abs())
}
