/// Number of watched input lines. Fixed at build time.
pub const CHANNEL_COUNT: usize = 2;

// The record header keeps the channel index in bits 0..=2.
const _: () = assert!(CHANNEL_COUNT <= 8);

/// Tick count of the session clock.
pub type ElapsedTime = u32;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn from_bit(bit: u8) -> Self {
        match bit {
            0 => Self::Low,
            _ => Self::High,
        }
    }

    pub const fn as_bit(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

/// One detected transition on a watched line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LineChange {
    pub channel: u8,
    pub level: Level,
}

/// Lifecycle of a capture session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Running,
    Full,
    Stopped,
}
