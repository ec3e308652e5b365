use super::types::{Level, LineChange, CHANNEL_COUNT};

/// Synchronous read of the current logical level of one input line.
/// Pin direction and pull-ups are configured before the core sees this.
pub trait LineReader {
    fn level(&self, channel: u8) -> Level;
}

/// Level-change detector over the watched lines.
pub struct LineSampler<R: LineReader> {
    reader: R,
    last: [Level; CHANNEL_COUNT],
    start: [Level; CHANNEL_COUNT],
}

impl<R: LineReader> LineSampler<R> {
    pub fn new(reader: R) -> Self {
        let mut sampler = Self {
            reader,
            last: [Level::Low; CHANNEL_COUNT],
            start: [Level::Low; CHANNEL_COUNT],
        };
        sampler.rearm();
        sampler
    }

    /// Re-sample every line; the current levels become both the change
    /// baseline and the reported session start levels.
    pub fn rearm(&mut self) {
        for channel in 0..CHANNEL_COUNT {
            let level = self.reader.level(channel as u8);
            self.last[channel] = level;
            self.start[channel] = level;
        }
    }

    /// First line, in ascending index order, whose level moved since its
    /// last recorded observation. A second line changing in the same poll
    /// quantum is left for a later poll, so the loop must call this faster
    /// than real transitions arrive.
    pub fn poll_once(&mut self) -> Option<LineChange> {
        for channel in 0..CHANNEL_COUNT {
            let level = self.reader.level(channel as u8);
            if level != self.last[channel] {
                self.last[channel] = level;
                return Some(LineChange {
                    channel: channel as u8,
                    level,
                });
            }
        }
        None
    }

    /// Levels sampled at the last rearm.
    pub fn start_levels(&self) -> [Level; CHANNEL_COUNT] {
        self.start
    }
}
