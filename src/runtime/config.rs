use core::sync::atomic::AtomicU32;

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

/// Packed-log arena size in bytes.
pub(crate) const CAPTURE_BUFFER_LEN: usize = 256;

/// Counter wraps observed by the timer overflow handler. The low 16 bits
/// form the high word of the session clock.
pub(crate) static OVERFLOW_COUNT: AtomicU32 = AtomicU32::new(0);

/// One-shot hand-off from the trigger edge handler to the polling loop.
pub(crate) static STOP_TRIGGER: Signal<CriticalSectionRawMutex, ()> = Signal::new();
