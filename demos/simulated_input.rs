use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use dev_helpers::{cents_to_string, raw_tone, TextDisplay};
use micro_tuner::{Classification, SpectrumView, Tuner, TunerConfig};

// Slightly out of tune violin strings and one note between strings, one second each.
const TONES: [f32; 5] = [199.0, 290.0, 445.0, 655.0, 520.0];
const CHUNK_SIZE: usize = 64;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TunerConfig::default();
    let mut tuner = match Tuner::new(config) {
        Ok(tuner) => tuner,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            return;
        }
    };
    let (mut producer, mut consumer) = tuner.frame_exchange();

    // Stands in for the ADC interrupt: pushes readings in real time,
    // one chunk at a time.
    let running = Arc::new(AtomicBool::new(true));
    let producer_running = running.clone();
    let sample_rate = config.sample_rate;
    let producer_thread = thread::spawn(move || {
        let chunk_duration = Duration::from_secs_f32(CHUNK_SIZE as f32 / sample_rate);
        for frequency in TONES.iter() {
            log::info!("Playing {} Hz", frequency);
            let readings = raw_tone(*frequency, sample_rate, 0.8, 0.0, sample_rate as usize);
            for chunk in readings.chunks(CHUNK_SIZE) {
                for raw in chunk {
                    producer.push(*raw);
                }
                thread::sleep(chunk_duration);
            }
        }
        producer_running.store(false, Ordering::Relaxed);
    });

    let start = Instant::now();
    let ticks = || start.elapsed().as_micros() as u32;
    let view = SpectrumView::default();
    let mut display = TextDisplay::new(view.width as usize, view.height as usize);
    let mut frame_count = 0;
    while running.load(Ordering::Relaxed) {
        match tuner.poll(&mut consumer, &ticks) {
            Some(analysis) => {
                view.render(
                    &mut display,
                    tuner.magnitudes(),
                    analysis.display_frequency(),
                    analysis.label(),
                );
                frame_count += 1;
                // Printing every frame floods the terminal
                if frame_count % 16 == 0 {
                    print!("{}", display.render(4));
                    if let Classification::Matched { index, .. } = analysis.classification {
                        println!(
                            "{:.1} Hz, {}",
                            analysis.frequency(),
                            cents_to_string(analysis.frequency(), config.pitches[index].frequency)
                        );
                    }
                }
            }
            None => thread::sleep(Duration::from_millis(1)),
        }
    }

    let _ = producer_thread.join();
    let diagnostics = tuner.diagnostics();
    log::info!(
        "Processed {} of {} frames, dropped {} samples, max latency {} us",
        diagnostics.frames_processed,
        diagnostics.frames_captured,
        diagnostics.dropped_samples,
        diagnostics.max_latency_ticks
    );
}
