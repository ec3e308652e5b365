use core::sync::atomic::Ordering;

use esp_hal::gpio::{Event, Input, InputConfig, Io, Pull};
use esp_hal::interrupt;
use esp_hal::peripherals::{Interrupt, GPIO27, IO_MUX, TIMG0};

use crate::capture::{Level, LineReader, TickSource, CHANNEL_COUNT};

use super::config::{OVERFLOW_COUNT, STOP_TRIGGER};

/// GPIO bits of the watched lines in `GPIO.in_`, ascending channel order
/// (GPIO25, GPIO26).
const LINE_MASKS: [u32; CHANNEL_COUNT] = [1 << 25, 1 << 26];
/// GPIO27 trigger bit in `GPIO.status_*`.
const TRIGGER_MASK: u32 = 1 << 27;

/// Ticks per wrap of the 16-bit low word.
const LOW_WORD_SPAN: u64 = 1 << 16;
/// APB at 80 MHz divided down to a 1 MHz tick.
const TICK_DIVIDER: u32 = 80;

/// TIMG T0CONFIG bits: enable, count up, level interrupt, alarm enable,
/// divider field.
const T0_EN: u32 = 1 << 31;
const T0_INCREASE: u32 = 1 << 30;
const T0_LEVEL_INT_EN: u32 = 1 << 11;
const T0_ALARM_EN: u32 = 1 << 10;
const T0_DIVIDER_SHIFT: u32 = 13;

/// The watched input lines. Pins are configured by the caller; reads go
/// through one raw snapshot of the input port per call.
pub(crate) struct InputLines {
    _lines: [Input<'static>; CHANNEL_COUNT],
}

impl InputLines {
    pub(crate) fn new(lines: [Input<'static>; CHANNEL_COUNT]) -> Self {
        Self { _lines: lines }
    }
}

impl LineReader for InputLines {
    fn level(&self, channel: u8) -> Level {
        let bits = unsafe { (*esp32::GPIO::PTR).in_().read().bits() };
        Level::from_bit((bits & LINE_MASKS[channel as usize] != 0) as u8)
    }
}

/// Configure the stop-trigger pin and route its falling edge to
/// `on_trigger_edge`. The returned pin must stay alive for the session.
pub(crate) fn arm_stop_trigger(io_mux: IO_MUX<'static>, pin: GPIO27<'static>) -> Input<'static> {
    let mut io = Io::new(io_mux);
    io.set_interrupt_handler(on_trigger_edge);
    let mut trigger = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
    trigger.listen(Event::FallingEdge);
    trigger
}

#[esp_hal::handler]
fn on_trigger_edge() {
    STOP_TRIGGER.signal(());
    // Clear the edge status directly; the pin object lives in the main
    // loop and the handler must not share it.
    unsafe {
        (*esp32::GPIO::PTR)
            .status_w1tc()
            .write(|w| w.bits(TRIGGER_MASK));
    }
}

#[esp_hal::handler]
fn counter_overflow() {
    let wraps = OVERFLOW_COUNT.fetch_add(1, Ordering::Relaxed) + 1;
    let next = (wraps as u64 + 1) * LOW_WORD_SPAN;
    unsafe {
        let timg = &*esp32::TIMG0::PTR;
        timg.int_clr_timers().write(|w| w.bits(1));
        timg.t0alarmlo().write(|w| w.bits(next as u32));
        timg.t0alarmhi().write(|w| w.bits((next >> 32) as u32));
        // The alarm-enable bit self-clears when it fires.
        timg.t0config().modify(|r, w| w.bits(r.bits() | T0_ALARM_EN));
    }
}

/// TIMG0 timer 0 as the session counter: counts up at 1 MHz and raises
/// `counter_overflow` at every 16-bit span, so `OVERFLOW_COUNT` tracks the
/// high half of the count with no drift.
pub(crate) struct FreeTicks;

impl FreeTicks {
    pub(crate) fn start(_timg0: TIMG0<'static>) -> Self {
        unsafe {
            let timg = &*esp32::TIMG0::PTR;
            timg.t0config().write(|w| {
                w.bits(
                    T0_INCREASE
                        | T0_LEVEL_INT_EN
                        | T0_ALARM_EN
                        | (TICK_DIVIDER << T0_DIVIDER_SHIFT),
                )
            });
            timg.t0loadlo().write(|w| w.bits(0));
            timg.t0loadhi().write(|w| w.bits(0));
            timg.t0load().write(|w| w.bits(1));
            timg.t0alarmlo().write(|w| w.bits(LOW_WORD_SPAN as u32));
            timg.t0alarmhi().write(|w| w.bits(0));
            timg.int_ena_timers().modify(|r, w| w.bits(r.bits() | 1));
        }
        OVERFLOW_COUNT.store(0, Ordering::Relaxed);
        unsafe {
            interrupt::bind_interrupt(Interrupt::TG0_T0_LEVEL, counter_overflow.handler());
        }
        let _ = interrupt::enable(Interrupt::TG0_T0_LEVEL, counter_overflow.priority());
        unsafe {
            let timg = &*esp32::TIMG0::PTR;
            timg.t0config().modify(|r, w| w.bits(r.bits() | T0_EN));
        }
        Self
    }
}

impl TickSource for FreeTicks {
    fn low_word(&self) -> u16 {
        unsafe {
            let timg = &*esp32::TIMG0::PTR;
            timg.t0update().write(|w| w.bits(1));
            (timg.t0lo().read().bits() & 0xFFFF) as u16
        }
    }

    fn overflow_count(&self) -> u16 {
        OVERFLOW_COUNT.load(Ordering::Relaxed) as u16
    }

    fn reset(&mut self) {
        unsafe {
            let timg = &*esp32::TIMG0::PTR;
            timg.t0loadlo().write(|w| w.bits(0));
            timg.t0loadhi().write(|w| w.bits(0));
            timg.t0load().write(|w| w.bits(1));
            timg.t0alarmlo().write(|w| w.bits(LOW_WORD_SPAN as u32));
            timg.t0alarmhi().write(|w| w.bits(0));
            timg.t0config().modify(|r, w| w.bits(r.bits() | T0_ALARM_EN));
        }
        OVERFLOW_COUNT.store(0, Ordering::Relaxed);
    }
}
