//! Runs the tuner on a WAV file, frame by frame.
//!
//! Usage: `cargo run --example wav_tuner [path/to/file.wav]`. Without a path,
//! a G string tone is synthesized and written to a temporary file first.

use std::env;

use dev_helpers::{offset_binary, read_wav, sine, write_wav};
use micro_tuner::{frame_exchange, Tuner, TunerConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            let path = env::temp_dir().join("micro_tuner_g_string.wav");
            let path = path.to_string_lossy().to_string();
            let samples = sine(196.0, 36608.0, 0.8, 0.0, 36608);
            if let Err(err) = write_wav(&path, 36608, &samples) {
                log::error!("Could not write {}: {}", path, err);
                return;
            }
            path
        }
    };

    let (sample_rate, samples) = match read_wav(&path) {
        Ok(result) => result,
        Err(err) => {
            log::error!("Could not read {}: {}", path, err);
            return;
        }
    };
    log::info!("Read {} samples at {} Hz from {}", samples.len(), sample_rate, path);

    let config = TunerConfig {
        sample_rate: sample_rate as f32,
        ..TunerConfig::default()
    };
    let mut tuner = match Tuner::new(config) {
        Ok(tuner) => tuner,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            return;
        }
    };

    // Every sample is consumed here, so nothing is ever dropped.
    let (mut producer, mut consumer) = frame_exchange(config.frame_len);
    for (index, sample) in samples.iter().enumerate() {
        producer.push(offset_binary(*sample));
        if let Some(frame) = consumer.try_acquire() {
            let analysis = tuner.process_frame(&frame);
            let time = (index as f32) / config.sample_rate;
            println!(
                "{:7.3} s | {:6.1} Hz | {:>4} | {:>2}",
                time,
                analysis.frequency(),
                analysis.display_frequency(),
                analysis.label()
            );
        }
    }
}
