pub mod buffer;
pub mod clock;
pub mod decode;
pub mod engine;
pub(crate) mod machine;
pub mod sampler;
pub mod types;

pub use buffer::{EventBuffer, RecordStatus, MAX_RECORD_LEN};
pub use clock::{TickSource, WideClock, LOW_WORD_BITS};
pub use decode::{DecodedEvent, EventReader};
pub use engine::{CaptureEngine, PollOutcome};
pub use sampler::{LineReader, LineSampler};
pub use types::{ElapsedTime, Level, LineChange, Phase, CHANNEL_COUNT};
