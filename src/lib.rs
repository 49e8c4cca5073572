//! A fixed point, `no_std` [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29) detector
//! for instrument tuners running on small microcontrollers.
//!
//! Samples are collected one at a time, typically from an ADC interrupt, into an
//! analysis frame. Each complete frame is Hann windowed and transformed with a
//! Q15 FFT. The strongest bin of the magnitude spectrum is refined using
//! parabolic interpolation and the resulting frequency is matched against a
//! table of reference pitches, by default the four strings of a violin.
//!
//! * Q15 arithmetic throughout the signal path. The only floats are in the
//!   interpolation and classification of one peak per frame.
//! * Buffers are allocated once on initialization. Processing a frame does not allocate.
//! * Lock free handoff of frames from interrupt context to the main loop.
//!
//! # Examples
//! ```
//! use micro_tuner::{NoTicks, Tuner, TunerConfig};
//!
//! let config = TunerConfig::default();
//! let mut tuner = Tuner::new(config).unwrap();
//! let (mut producer, mut consumer) = tuner.frame_exchange();
//!
//! // Interrupt side: push one raw, offset binary ADC reading per conversion.
//! // Here, an A string at 440 Hz.
//! for i in 0..config.frame_len {
//!     let t = (i as f32) / config.sample_rate;
//!     let value = 0.9 * (2.0 * core::f32::consts::PI * 440.0 * t).sin();
//!     let raw = ((value * 32767.0) as i16 as u16) ^ 0x8000;
//!     producer.push(raw);
//! }
//!
//! // Main loop side: analyze the frame once it is complete.
//! let analysis = tuner.poll(&mut consumer, &NoTicks).unwrap();
//! println!("{} Hz, {}", analysis.display_frequency(), analysis.label());
//! assert_eq!(analysis.label(), "A");
//! ```
//!
//! Results can be drawn on any display implementing [`DisplaySurface`]
//! using a [`SpectrumView`].

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod acquisition;
pub mod classifier;
pub mod common;
mod config;
pub mod display;
mod error;
pub mod frame;
pub mod magnitude;
pub mod peak;
mod tuner;

pub use acquisition::{frame_exchange, CaptureStats, FrameConsumer, FrameGuard, SampleProducer};
pub use classifier::{classify, Classification, ReferencePitch, UNMATCHED_LABEL, VIOLIN_STRINGS};
pub use config::{TunerConfig, DEFAULT_FRAME_LEN, DEFAULT_SAMPLE_RATE, DEFAULT_TOLERANCE_PERCENT};
pub use display::{DisplaySurface, SpectrumView};
pub use error::ConfigError;
pub use peak::PeakEstimate;
pub use tuner::{Analysis, Diagnostics, NoTicks, TickSource, Tuner};
