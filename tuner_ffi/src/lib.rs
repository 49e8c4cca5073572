//! C bindings for running the tuner from C firmware.
//!
//! Call `tuner_init` once, `tuner_push_sample` from the ADC interrupt handler
//! and `tuner_poll` from the main loop. The getters return the results of the
//! most recently analyzed frame.

#[macro_use]
extern crate lazy_static;

use std::sync::{Mutex, MutexGuard};

use log::error;
use micro_tuner::{
    Analysis, Classification, FrameConsumer, NoTicks, SampleProducer, Tuner, TunerConfig,
};

struct TunerState {
    tuner: Tuner,
    consumer: FrameConsumer,
}

lazy_static! {
    // Kept apart from the tuner so that pushing a sample never waits for a
    // frame being analyzed.
    static ref PRODUCER: Mutex<Option<SampleProducer>> = Mutex::new(None);
    static ref STATE: Mutex<Option<TunerState>> = Mutex::new(None);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn latest() -> Option<Analysis> {
    lock(&STATE).as_ref().and_then(|state| state.tuner.latest())
}

/// Sets up the tuner with the default violin configuration at the given
/// sample rate. Returns false if the sample rate is rejected.
#[no_mangle]
pub extern "C" fn tuner_init(sample_rate_hz: f32) -> bool {
    let config = TunerConfig {
        sample_rate: sample_rate_hz,
        ..TunerConfig::default()
    };
    match Tuner::new(config) {
        Ok(tuner) => {
            let (producer, consumer) = tuner.frame_exchange();
            *lock(&STATE) = Some(TunerState { tuner, consumer });
            *lock(&PRODUCER) = Some(producer);
            true
        }
        Err(err) => {
            error!("Could not initialize tuner: {}", err);
            false
        }
    }
}

/// Pushes one raw, offset binary ADC reading. Does nothing before `tuner_init`.
#[no_mangle]
pub extern "C" fn tuner_push_sample(raw: u16) {
    if let Ok(mut producer) = PRODUCER.try_lock() {
        if let Some(producer) = producer.as_mut() {
            producer.push(raw);
        }
    }
}

/// Analyzes the pending frame, if any. Returns true if a new result is available.
#[no_mangle]
pub extern "C" fn tuner_poll() -> bool {
    match lock(&STATE).as_mut() {
        Some(state) => state.tuner.poll(&mut state.consumer, &NoTicks).is_some(),
        None => false,
    }
}

#[no_mangle]
pub extern "C" fn tuner_frequency_hz() -> f32 {
    latest().map_or(0.0, |analysis| analysis.frequency())
}

#[no_mangle]
pub extern "C" fn tuner_display_frequency() -> i32 {
    latest().map_or(0, |analysis| analysis.display_frequency())
}

/// The index of the matched string, or -1.
#[no_mangle]
pub extern "C" fn tuner_matched_index() -> i32 {
    match latest().map(|analysis| analysis.classification) {
        Some(Classification::Matched { index, .. }) => index as i32,
        _ => -1,
    }
}

#[no_mangle]
pub extern "C" fn tuner_dropped_samples() -> u32 {
    lock(&STATE)
        .as_ref()
        .map_or(0, |state| state.consumer.stats().dropped_samples)
}

/// Copies up to `max_size` Q15 magnitudes of the latest frame to `raw_buffer`
/// and returns the number copied.
///
/// # Safety
///
/// `raw_buffer` must be null or valid for writing `max_size` values.
#[no_mangle]
pub unsafe extern "C" fn tuner_copy_spectrum(raw_buffer: *mut i16, max_size: usize) -> usize {
    if raw_buffer.is_null() {
        return 0;
    }
    let state = lock(&STATE);
    let magnitudes = match state.as_ref() {
        Some(state) => state.tuner.magnitudes(),
        None => return 0,
    };
    let count = magnitudes.len().min(max_size);
    let target_buffer: &mut [i16] = std::slice::from_raw_parts_mut(raw_buffer, count);
    target_buffer.copy_from_slice(&magnitudes[..count]);
    count
}
