use heapless::Vec;

use super::types::{ElapsedTime, Level};

/// Largest encodable record: one header byte plus four delta bytes.
pub const MAX_RECORD_LEN: usize = 5;

/// Outcome of the admission check on a single record.
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecordStatus {
    Admitted,
    Rejected,
}

/// Append-only arena holding the packed event log of one session.
///
/// Record layout, little-endian: a header byte packing the channel index
/// (bits 0..=2), the new level (bit 3), and the delta length code `tmlen`
/// (bits 4..=5), followed by `tmlen + 1` bytes of the elapsed-tick delta,
/// least significant byte first.
pub struct EventBuffer<const C: usize> {
    bytes: Vec<u8, C>,
}

impl<const C: usize> EventBuffer<C> {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Encode and append one event, or reject it leaving the arena
    /// untouched. Admission is strict: a record that would exactly fill
    /// the capacity is rejected, so the cursor never reaches `C`.
    pub fn record(&mut self, channel: u8, level: Level, delta: ElapsedTime) -> RecordStatus {
        let tmlen = delta_len(delta);
        let len = tmlen + 2;
        if self.bytes.len() + len >= C {
            return RecordStatus::Rejected;
        }
        let mut record = [0u8; MAX_RECORD_LEN];
        record[0] = channel | (level.as_bit() << 3) | ((tmlen as u8) << 4);
        record[1..=tmlen + 1].copy_from_slice(&delta.to_le_bytes()[..=tmlen]);
        if self.bytes.extend_from_slice(&record[..len]).is_err() {
            return RecordStatus::Rejected;
        }
        RecordStatus::Admitted
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Logical clear for a new session; capacity is untouched.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl<const C: usize> Default for EventBuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Extra delta bytes beyond the first needed to hold `delta`.
const fn delta_len(delta: ElapsedTime) -> usize {
    match delta {
        0..=0xFF => 0,
        0x100..=0xFFFF => 1,
        0x1_0000..=0xFF_FFFF => 2,
        _ => 3,
    }
}
