use super::types::{ElapsedTime, Level};

/// One replayed event from a sealed buffer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DecodedEvent {
    /// Ticks since the previous event (0 for the first of a session).
    pub ticks: ElapsedTime,
    pub channel: u8,
    pub level: Level,
}

/// Forward-only replay of a sealed event buffer; the exact inverse of
/// `EventBuffer::record`.
pub struct EventReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> EventReader<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl Iterator for EventReader<'_> {
    type Item = DecodedEvent;

    fn next(&mut self) -> Option<DecodedEvent> {
        let header = *self.bytes.get(self.offset)?;
        let tmlen = ((header >> 4) & 0x03) as usize;
        let end = self.offset + tmlen + 2;
        // A conforming encoder never splits a record across the end of the
        // sealed region; stop rather than over-read on a foreign tail.
        let delta = self.bytes.get(self.offset + 1..end)?;
        let mut ticks: ElapsedTime = 0;
        for (i, &byte) in delta.iter().enumerate() {
            ticks |= (byte as ElapsedTime) << (8 * i);
        }
        self.offset = end;
        Some(DecodedEvent {
            ticks,
            channel: header & 0x07,
            level: Level::from_bit((header >> 3) & 0x01),
        })
    }
}
