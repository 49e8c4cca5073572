/// Reads a 16 bit integer WAV file and returns its sample rate and the
/// samples of its first channel, scaled to [-1, 1].
pub fn read_wav(path: &str) -> Result<(u32, Vec<f32>), hound::Error> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channel_count = spec.channels.max(1) as usize;
    let scale = 1. / (i16::MAX as f32);
    let samples = reader
        .samples::<i16>()
        .step_by(channel_count)
        .map(|sample| sample.map(|value| (value as f32) * scale))
        .collect::<Result<Vec<f32>, hound::Error>>()?;
    Ok((spec.sample_rate, samples))
}

/// Writes mono samples in [-1, 1] to a 16 bit integer WAV file.
/// Out of range samples are clamped.
pub fn write_wav(path: &str, sample_rate: u32, buffer: &[f32]) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    let amplitude = i16::MAX as f32;
    for sample in buffer.iter() {
        let clamped_sample = sample.max(-1.0).min(1.0);
        writer.write_sample((clamped_sample * amplitude) as i16)?;
    }
    writer.finalize()
}
