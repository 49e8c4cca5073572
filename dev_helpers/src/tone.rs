use micro_tuner::common::from_f32;

/// Samples of `amplitude * sin(2 pi f t + phase)`.
pub fn sine(
    frequency: f32,
    sample_rate: f32,
    amplitude: f32,
    phase: f32,
    len: usize,
) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = (i as f32) / sample_rate;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t + phase).sin()
        })
        .collect()
}

/// Quantizes a sample in [-1, 1] the way a 16 bit, offset binary ADC would.
pub fn offset_binary(sample: f32) -> u16 {
    (from_f32(sample) as u16) ^ 0x8000
}

/// Raw ADC readings of a sine tone, ready to be pushed to a
/// [`SampleProducer`](micro_tuner::SampleProducer).
pub fn raw_tone(
    frequency: f32,
    sample_rate: f32,
    amplitude: f32,
    phase: f32,
    len: usize,
) -> Vec<u16> {
    sine(frequency, sample_rate, amplitude, phase, len)
        .into_iter()
        .map(offset_binary)
        .collect()
}
