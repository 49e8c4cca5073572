//! Single-slot handoff of analysis frames from an interrupt handler to the main loop.
//!
//! The [`SampleProducer`] half is fed one sample per conversion and fills the
//! frame in place. When the frame is full it raises the ready flag with a
//! `Release` store and stops writing. The [`FrameConsumer`] half observes the
//! flag with an `Acquire` load, reads the frame through a [`FrameGuard`] and
//! clears the flag when the guard is dropped. While the flag is raised every
//! incoming sample is dropped and counted, so the frame being read is never
//! modified.

use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::cell::UnsafeCell;
use core::ops::Deref;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::common::{from_offset_binary, Q15};

struct Slot {
    frame: Box<[UnsafeCell<Q15>]>,
    ready: AtomicBool,
    dropped_samples: AtomicU32,
    completed_frames: AtomicU32,
}

// The frame is written only by the producer while `ready` is false and read
// only by the consumer while `ready` is true.
unsafe impl Sync for Slot {}

impl Slot {
    fn stats(&self) -> CaptureStats {
        CaptureStats {
            dropped_samples: self.dropped_samples.load(Ordering::Relaxed),
            completed_frames: self.completed_frames.load(Ordering::Relaxed),
        }
    }
}

/// Counters shared by both halves of a frame exchange. Both wrap on overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Samples discarded because a complete frame was waiting to be read.
    pub dropped_samples: u32,
    /// Frames filled by the producer.
    pub completed_frames: u32,
}

/// Creates a frame exchange for frames of `frame_len` samples.
///
/// # Panics
///
/// Panics if `frame_len` is zero.
pub fn frame_exchange(frame_len: usize) -> (SampleProducer, FrameConsumer) {
    if frame_len == 0 {
        panic!("Frame length must be greater than zero")
    }
    let frame: Vec<UnsafeCell<Q15>> = (0..frame_len).map(|_| UnsafeCell::new(0)).collect();
    let slot = Arc::new(Slot {
        frame: frame.into_boxed_slice(),
        ready: AtomicBool::new(false),
        dropped_samples: AtomicU32::new(0),
        completed_frames: AtomicU32::new(0),
    });
    (
        SampleProducer {
            slot: slot.clone(),
            write_index: 0,
        },
        FrameConsumer { slot },
    )
}

/// The interrupt side of a frame exchange.
pub struct SampleProducer {
    slot: Arc<Slot>,
    write_index: usize,
}

impl SampleProducer {
    /// Pushes a raw offset-binary ADC reading.
    #[inline]
    pub fn push(&mut self, raw: u16) {
        self.push_sample(from_offset_binary(raw))
    }

    /// Appends a sample to the frame in progress, or drops it if a complete
    /// frame has not been released yet.
    pub fn push_sample(&mut self, sample: Q15) {
        let slot = &*self.slot;
        if slot.ready.load(Ordering::Acquire) {
            slot.dropped_samples.fetch_add(1, Ordering::Relaxed);
            return;
        }
        unsafe {
            *slot.frame[self.write_index].get() = sample;
        }
        self.write_index += 1;
        if self.write_index == slot.frame.len() {
            self.write_index = 0;
            slot.completed_frames.fetch_add(1, Ordering::Relaxed);
            slot.ready.store(true, Ordering::Release);
        }
    }

    /// True while a complete frame waits for the consumer.
    pub fn is_frame_pending(&self) -> bool {
        self.slot.ready.load(Ordering::Acquire)
    }

    pub fn frame_len(&self) -> usize {
        self.slot.frame.len()
    }

    pub fn stats(&self) -> CaptureStats {
        self.slot.stats()
    }
}

/// The main loop side of a frame exchange.
pub struct FrameConsumer {
    slot: Arc<Slot>,
}

impl FrameConsumer {
    /// Returns the completed frame, if there is one. The producer starts
    /// filling the next frame once the returned guard is dropped.
    pub fn try_acquire(&mut self) -> Option<FrameGuard<'_>> {
        if self.slot.ready.load(Ordering::Acquire) {
            Some(FrameGuard { slot: &self.slot })
        } else {
            None
        }
    }

    pub fn frame_len(&self) -> usize {
        self.slot.frame.len()
    }

    pub fn stats(&self) -> CaptureStats {
        self.slot.stats()
    }
}

/// Read access to a completed frame. Dropping the guard hands the frame
/// back to the producer.
pub struct FrameGuard<'a> {
    slot: &'a Slot,
}

impl<'a> Deref for FrameGuard<'a> {
    type Target = [Q15];

    fn deref(&self) -> &[Q15] {
        let frame = &self.slot.frame;
        // UnsafeCell<Q15> has the same layout as Q15, and the producer does
        // not write while the guard exists.
        unsafe { core::slice::from_raw_parts(frame.as_ptr() as *const Q15, frame.len()) }
    }
}

impl<'a> Drop for FrameGuard<'a> {
    fn drop(&mut self) {
        self.slot.ready.store(false, Ordering::Release);
    }
}
