use core::fmt::{self, Write};

use crate::capture::{DecodedEvent, EventReader, Level, CHANNEL_COUNT};

/// Emit the serial replay of a sealed capture: `begin`, one start-level
/// line per channel in ascending order, one line per decoded event, `end`.
/// All numeric fields are decimal text.
pub fn write_report<W: Write>(
    out: &mut W,
    start_levels: &[Level; CHANNEL_COUNT],
    recorded: &[u8],
) -> fmt::Result {
    writeln!(out, "begin")?;
    for (channel, level) in start_levels.iter().enumerate() {
        writeln!(out, "{}: {}", channel, level.as_bit())?;
    }
    for DecodedEvent {
        ticks,
        channel,
        level,
    } in EventReader::new(recorded)
    {
        writeln!(out, "{}: {} = {}", ticks, channel, level.as_bit())?;
    }
    writeln!(out, "end")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_frames_start_levels_and_events() {
        // ch0 high after 0 ticks, ch1 high 295 ticks later.
        let recorded = [0x08, 0x00, 0x19, 0x27, 0x01];
        let mut out = String::new();
        write_report(&mut out, &[Level::Low, Level::Low], &recorded).unwrap();
        assert_eq!(out, "begin\n0: 0\n1: 0\n0: 0 = 1\n295: 1 = 1\nend\n");
    }

    #[test]
    fn empty_capture_still_frames() {
        let mut out = String::new();
        write_report(&mut out, &[Level::High, Level::Low], &[]).unwrap();
        assert_eq!(out, "begin\n0: 1\n1: 0\nend\n");
    }
}
