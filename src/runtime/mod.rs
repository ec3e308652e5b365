mod config;
mod hw;

use esp_hal::gpio::{Input, InputConfig, Level as PinLevel, Output, OutputConfig, Pull};
use esp_println::println;

use crate::capture::{CaptureEngine, Phase, PollOutcome};
use crate::report;

/// Firmware entry: configure the watched lines, the session counter, and
/// the stop trigger, then drive the cooperative sampling loop forever.
/// When the session seals, the packed log replays over the console and the
/// loop parks in Stopped.
pub fn run() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());

    let lines = hw::InputLines::new([
        Input::new(peripherals.GPIO25, InputConfig::default().with_pull(Pull::Up)),
        Input::new(peripherals.GPIO26, InputConfig::default().with_pull(Pull::Up)),
    ]);
    let _trigger = hw::arm_stop_trigger(peripherals.IO_MUX, peripherals.GPIO27);
    let ticks = hw::FreeTicks::start(peripherals.TIMG0);
    let mut led = Output::new(peripherals.GPIO2, PinLevel::Low, OutputConfig::default());

    let mut engine: CaptureEngine<_, _, { config::CAPTURE_BUFFER_LEN }> =
        CaptureEngine::new(lines, ticks);

    println!("capture: waiting for first edge");
    loop {
        if config::STOP_TRIGGER.try_take().is_some() && engine.request_stop() {
            println!("capture: external stop");
        }
        if let PollOutcome::Armed = engine.poll() {
            led.set_high();
            println!("capture: armed");
        }
        if matches!(engine.phase(), Phase::Full) {
            led.set_low();
            println!("capture: sealed ({} bytes)", engine.recorded_len());
            let mut out = esp_println::Printer;
            if report::write_report(&mut out, &engine.start_levels(), engine.recorded()).is_err() {
                println!("capture: report write failed");
            }
            let _ = engine.mark_drained();
            println!("capture: stopped");
        }
    }
}
