use alloc::{boxed::Box, vec};
use log::{info, trace, warn};
use num_complex::Complex;

use crate::acquisition::{frame_exchange, FrameConsumer, SampleProducer};
use crate::classifier::{classify, Classification};
use crate::common::{ComplexFft, Radix2Q15, WindowTable, Q15};
use crate::config::TunerConfig;
use crate::error::ConfigError;
use crate::frame::prepare_frame;
use crate::magnitude::complex_magnitudes;
use crate::peak::{estimate_peak, PeakEstimate};

/// A free running counter used to measure how long a frame takes to process,
/// e.g. a cycle counter or a hardware timer.
pub trait TickSource {
    fn ticks(&self) -> u32;
}

impl<F: Fn() -> u32> TickSource for F {
    fn ticks(&self) -> u32 {
        self()
    }
}

/// A tick source that never advances, for when latency is not of interest.
pub struct NoTicks;

impl TickSource for NoTicks {
    fn ticks(&self) -> u32 {
        0
    }
}

/// The result of analyzing one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analysis {
    pub peak: PeakEstimate,
    pub classification: Classification,
    /// True if the peak magnitude was below the silence floor. Silent frames
    /// are never matched to a reference pitch.
    pub silent: bool,
}

impl Analysis {
    /// The refined peak frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.peak.frequency
    }

    /// The refined peak frequency rounded to the nearest integer.
    pub fn display_frequency(&self) -> i32 {
        self.peak.display_frequency()
    }

    pub fn label(&self) -> &'static str {
        self.classification.label()
    }
}

/// Counters describing how well the main loop keeps up with acquisition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub frames_processed: u32,
    /// Frames filled by the sample producer, as of the last poll.
    pub frames_captured: u32,
    /// Samples dropped by the sample producer, as of the last poll.
    pub dropped_samples: u32,
    /// Ticks spent in the most recent successful poll.
    pub last_latency_ticks: u32,
    pub max_latency_ticks: u32,
}

/// The frame analysis pipeline: windowing, transform, magnitudes, peak
/// estimation and classification.
///
/// All buffers are allocated by the constructor. Processing a frame does not
/// allocate and cannot fail.
pub struct Tuner<F: ComplexFft = Radix2Q15> {
    config: TunerConfig,
    window: WindowTable,
    fft: F,
    spectrum: Box<[Complex<Q15>]>,
    magnitudes: Box<[Q15]>,
    diagnostics: Diagnostics,
    latest: Option<Analysis>,
}

impl Tuner<Radix2Q15> {
    /// Creates a tuner using the fixed point radix-2 kernel.
    pub fn new(config: TunerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fft = Radix2Q15::new(config.frame_len)?;
        Tuner::with_fft(config, fft)
    }
}

impl<F: ComplexFft> Tuner<F> {
    /// Creates a tuner using the given transform kernel, which must have
    /// been built for `config.frame_len`.
    pub fn with_fft(config: TunerConfig, fft: F) -> Result<Self, ConfigError> {
        config.validate()?;
        if fft.len() != config.frame_len {
            return Err(ConfigError::FftLengthMismatch {
                expected: config.frame_len,
                actual: fft.len(),
            });
        }
        info!(
            "Tuner ready: {} samples per frame at {} Hz, {} Hz per bin, {} reference pitches",
            config.frame_len,
            config.sample_rate,
            config.bin_width(),
            config.pitches.len()
        );
        Ok(Tuner {
            window: WindowTable::hann(config.frame_len),
            fft,
            spectrum: vec![Complex::new(0, 0); config.frame_len].into_boxed_slice(),
            magnitudes: vec![0; config.bin_count()].into_boxed_slice(),
            diagnostics: Diagnostics::default(),
            latest: None,
            config,
        })
    }

    /// Creates a frame exchange with frames of the configured length.
    pub fn frame_exchange(&self) -> (SampleProducer, FrameConsumer) {
        frame_exchange(self.config.frame_len)
    }

    /// Analyzes one complete frame.
    ///
    /// # Panics
    ///
    /// Panics if `frame` does not hold exactly `frame_len` samples.
    pub fn process_frame(&mut self, frame: &[Q15]) -> Analysis {
        prepare_frame(frame, &self.window, &mut self.spectrum);
        self.analyze_prepared()
    }

    /// Analyzes the pending frame of `consumer`, if there is one.
    ///
    /// The frame is handed back to the producer as soon as it has been
    /// copied into the transform buffer, before the transform runs.
    ///
    /// # Panics
    ///
    /// Panics if the exchange was created for a different frame length.
    pub fn poll<T: TickSource>(
        &mut self,
        consumer: &mut FrameConsumer,
        ticks: &T,
    ) -> Option<Analysis> {
        let start = ticks.ticks();
        {
            let frame = consumer.try_acquire()?;
            prepare_frame(&frame, &self.window, &mut self.spectrum);
        }
        let analysis = self.analyze_prepared();
        let latency = ticks.ticks().wrapping_sub(start);

        let stats = consumer.stats();
        let newly_dropped = stats
            .dropped_samples
            .wrapping_sub(self.diagnostics.dropped_samples);
        if newly_dropped > 0 {
            warn!(
                "Dropped {} samples while a frame was pending ({} in total)",
                newly_dropped, stats.dropped_samples
            );
        }
        let diagnostics = &mut self.diagnostics;
        diagnostics.frames_captured = stats.completed_frames;
        diagnostics.dropped_samples = stats.dropped_samples;
        diagnostics.last_latency_ticks = latency;
        diagnostics.max_latency_ticks = diagnostics.max_latency_ticks.max(latency);
        Some(analysis)
    }

    fn analyze_prepared(&mut self) -> Analysis {
        let config = &self.config;
        self.fft.forward(&mut self.spectrum);
        complex_magnitudes(
            &self.spectrum,
            config.magnitude_gain_shift,
            &mut self.magnitudes,
        );
        let peak = estimate_peak(
            &self.magnitudes,
            config.min_peak_bin,
            config.sample_rate,
            config.frame_len,
        );
        let silent = peak.magnitude < config.silence_floor;
        let classification = if silent {
            Classification::Unmatched
        } else {
            classify(peak.frequency, config.pitches)
        };
        let analysis = Analysis {
            peak,
            classification,
            silent,
        };
        self.diagnostics.frames_processed = self.diagnostics.frames_processed.wrapping_add(1);
        trace!(
            "Peak at bin {} (offset {:.3}, magnitude {}): {:.2} Hz -> {}",
            peak.bin,
            peak.offset,
            peak.magnitude,
            peak.frequency,
            classification.label()
        );
        self.latest = Some(analysis);
        analysis
    }

    /// The most recent analysis, if any frame has been processed.
    pub fn latest(&self) -> Option<Analysis> {
        self.latest
    }

    /// The magnitude spectrum of the most recent frame, N/2 bins.
    pub fn magnitudes(&self) -> &[Q15] {
        &self.magnitudes
    }

    /// The transform output of the most recent frame, in natural bin order.
    pub fn spectrum(&self) -> &[Complex<Q15>] {
        &self.spectrum
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    pub fn window(&self) -> &WindowTable {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::vec::Vec;
    use crate::classifier::VIOLIN_STRINGS;
    use crate::common::{from_f32, MicrofftQ15};
    use core::cell::Cell;

    fn tone(frequency: f32, sample_rate: f32, len: usize) -> Vec<Q15> {
        (0..len)
            .map(|i| {
                let phase = 2.0 * std::f32::consts::PI * frequency * (i as f32) / sample_rate;
                from_f32(0.9 * phase.sin())
            })
            .collect()
    }

    #[test]
    fn test_violin_strings() {
        let mut tuner = Tuner::new(TunerConfig::default()).unwrap();
        let bin_width = tuner.config().bin_width();
        for (index, pitch) in VIOLIN_STRINGS.iter().enumerate() {
            let frame = tone(pitch.frequency, tuner.config().sample_rate, 256);
            let analysis = tuner.process_frame(&frame);
            assert!(!analysis.silent);
            assert_eq!(
                analysis.classification,
                Classification::Matched {
                    index,
                    name: pitch.name
                }
            );
            // G is 1.37 bins from DC and the estimate stops half a bin below bin 2.
            let tolerance = if pitch.name == "G" { 20.0 } else { bin_width / 10.0 };
            assert!((analysis.frequency() - pitch.frequency).abs() < tolerance);
        }
        assert_eq!(tuner.diagnostics().frames_processed, 4);
    }

    #[test]
    fn test_a_string_readout() {
        let mut tuner = Tuner::new(TunerConfig::default()).unwrap();
        let analysis = tuner.process_frame(&tone(440.0, 36608.0, 256));
        assert_eq!(analysis.peak.bin, 3);
        assert_eq!(analysis.label(), "A");
        assert!((analysis.display_frequency() - 437).abs() <= 1);
        assert_eq!(tuner.latest(), Some(analysis));
        assert_eq!(tuner.magnitudes().len(), 128);
        assert_eq!(tuner.spectrum().len(), 256);
    }

    #[test]
    fn test_silence() {
        let mut tuner = Tuner::new(TunerConfig::default()).unwrap();
        let analysis = tuner.process_frame(&[0; 256]);
        assert!(tuner.magnitudes().iter().all(|m| *m == 0));
        assert_eq!(analysis.peak.bin, 2);
        assert_eq!(analysis.peak.offset, 0.0);
        assert!(analysis.silent);
        assert_eq!(analysis.classification, Classification::Unmatched);
        assert_eq!(analysis.label(), "--");
    }

    #[test]
    fn test_microfft_kernel_agrees() {
        let config = TunerConfig::default();
        let mut fixed = Tuner::new(config).unwrap();
        let mut float = Tuner::with_fft(config, MicrofftQ15::new(256).unwrap()).unwrap();
        for frequency in [293.66, 440.0, 659.25] {
            let frame = tone(frequency, config.sample_rate, 256);
            let a = fixed.process_frame(&frame);
            let b = float.process_frame(&frame);
            assert_eq!(a.classification, b.classification);
            assert_eq!(a.peak.bin, b.peak.bin);
            assert!((a.frequency() - b.frequency()).abs() < 5.0);
        }
    }

    #[test]
    fn test_rejects_invalid_setup() {
        let config = TunerConfig {
            frame_len: 100,
            ..TunerConfig::default()
        };
        assert!(Tuner::new(config).is_err());

        let result = Tuner::with_fft(TunerConfig::default(), Radix2Q15::new(128).unwrap());
        assert!(matches!(
            result,
            Err(ConfigError::FftLengthMismatch {
                expected: 256,
                actual: 128
            })
        ));
    }

    #[test]
    fn test_poll() {
        let mut tuner = Tuner::new(TunerConfig::default()).unwrap();
        let (mut producer, mut consumer) = tuner.frame_exchange();
        let clock = Cell::new(0u32);
        let ticks = || {
            let now = clock.get();
            clock.set(now + 10);
            now
        };

        assert_eq!(tuner.poll(&mut consumer, &ticks), None);

        let frame = tone(659.25, 36608.0, 256);
        for sample in frame.iter() {
            producer.push_sample(*sample);
        }
        for _ in 0..5 {
            producer.push_sample(0);
        }
        let analysis = tuner.poll(&mut consumer, &ticks).unwrap();
        assert_eq!(analysis.label(), "E");
        assert!(!producer.is_frame_pending());

        let diagnostics = tuner.diagnostics();
        assert_eq!(diagnostics.frames_processed, 1);
        assert_eq!(diagnostics.frames_captured, 1);
        assert_eq!(diagnostics.dropped_samples, 5);
        assert_eq!(diagnostics.last_latency_ticks, 10);
        assert_eq!(diagnostics.max_latency_ticks, 10);

        assert_eq!(tuner.poll(&mut consumer, &NoTicks), None);
    }
}
