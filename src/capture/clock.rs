use super::types::ElapsedTime;

/// Bit width of the directly readable hardware counter word.
pub const LOW_WORD_BITS: u32 = 16;

/// Free-running counter peripheral plus the overflow word its wrap
/// handler maintains.
pub trait TickSource {
    /// Current value of the hardware counter register.
    fn low_word(&self) -> u16;

    /// Overflow count, incremented once per counter wrap by a handler
    /// that can preempt the caller at any point.
    fn overflow_count(&self) -> u16;

    /// Zero both the hardware counter and the overflow count.
    fn reset(&mut self);
}

/// Session clock widening the hardware counter with its overflow word.
pub struct WideClock<T: TickSource> {
    source: T,
}

impl<T: TickSource> WideClock<T> {
    pub const fn new(source: T) -> Self {
        Self { source }
    }

    /// Ticks since the last `reset`.
    ///
    /// The overflow handler may fire between the two register reads, so
    /// the high word is read on both sides of the low word and the pair
    /// is retried until it holds still.
    pub fn elapsed(&self) -> ElapsedTime {
        loop {
            let high = self.source.overflow_count();
            let low = self.source.low_word();
            if self.source.overflow_count() == high {
                return ((high as u32) << LOW_WORD_BITS) | low as u32;
            }
        }
    }

    /// Establish tick 0 for a new session.
    pub fn reset(&mut self) {
        self.source.reset();
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    struct ScriptedSource {
        low: Cell<u16>,
        high: Cell<u16>,
        // When set, the overflow handler "fires" during the next low-word
        // read, after the caller already sampled the high word.
        wrap_during_low_read: Cell<bool>,
    }

    impl ScriptedSource {
        fn new(low: u16, high: u16) -> Self {
            Self {
                low: Cell::new(low),
                high: Cell::new(high),
                wrap_during_low_read: Cell::new(false),
            }
        }
    }

    impl TickSource for ScriptedSource {
        fn low_word(&self) -> u16 {
            if self.wrap_during_low_read.take() {
                self.high.set(self.high.get() + 1);
                self.low.set(3);
            }
            self.low.get()
        }

        fn overflow_count(&self) -> u16 {
            self.high.get()
        }

        fn reset(&mut self) {
            self.low.set(0);
            self.high.set(0);
        }
    }

    #[test]
    fn composes_high_and_low_words() {
        let clock = WideClock::new(ScriptedSource::new(0x0005, 0x0002));
        assert_eq!(clock.elapsed(), 0x0002_0005);
    }

    #[test]
    fn retries_when_overflow_fires_between_reads() {
        let source = ScriptedSource::new(0xFFFF, 0x0001);
        source.wrap_during_low_read.set(true);
        let clock = WideClock::new(source);
        // The first (high, low) pair is torn; the retry must observe the
        // post-wrap pair, never 0x0001_0003 or 0x0002_FFFF.
        assert_eq!(clock.elapsed(), 0x0002_0003);
    }

    #[test]
    fn elapsed_is_monotonic_across_a_wrap() {
        let source = ScriptedSource::new(0xFFFF, 0x0000);
        let clock = WideClock::new(source);
        let before = clock.elapsed();
        clock.source.low.set(0x0000);
        clock.source.high.set(0x0001);
        let after = clock.elapsed();
        assert!(after >= before);
        assert_eq!(after, 0x0001_0000);
    }

    #[test]
    fn reset_returns_to_tick_zero() {
        let mut clock = WideClock::new(ScriptedSource::new(0x1234, 0x0042));
        clock.reset();
        assert_eq!(clock.elapsed(), 0);
    }
}
