use statig::blocking::IntoStateMachineExt as _;

use super::buffer::{EventBuffer, RecordStatus};
use super::clock::{TickSource, WideClock};
use super::machine::{CaptureApplyStatus, CaptureEvent, CaptureMachine, DispatchContext};
use super::sampler::{LineReader, LineSampler};
use super::types::{ElapsedTime, Level, Phase, CHANNEL_COUNT};

/// What a single loop iteration observed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PollOutcome {
    /// No watched line moved.
    Quiet,
    /// First edge of the session; the clock is now running.
    Armed,
    /// An edge was recorded.
    Recorded,
    /// This poll exhausted the arena; the session sealed.
    Sealed,
    /// The session is past recording; polls are inert.
    Inactive,
}

/// One capture session end to end: sampler, clock, arena, and the phase
/// machine that ties them together. Owned and driven by the polling loop;
/// the interrupt handlers reach it only through `TickSource` and
/// `request_stop`.
pub struct CaptureEngine<R: LineReader, T: TickSource, const C: usize> {
    machine: statig::blocking::StateMachine<CaptureMachine>,
    sampler: LineSampler<R>,
    clock: WideClock<T>,
    buffer: EventBuffer<C>,
    baseline: ElapsedTime,
}

impl<R: LineReader, T: TickSource, const C: usize> CaptureEngine<R, T, C> {
    pub fn new(reader: R, ticks: T) -> Self {
        Self {
            machine: CaptureMachine::new().state_machine(),
            sampler: LineSampler::new(reader),
            clock: WideClock::new(ticks),
            buffer: EventBuffer::new(),
            baseline: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.machine.inner().phase
    }

    /// One iteration of the cooperative sampling loop.
    pub fn poll(&mut self) -> PollOutcome {
        match self.phase() {
            Phase::Idle => self.poll_idle(),
            Phase::Running => self.poll_running(),
            Phase::Full | Phase::Stopped => PollOutcome::Inactive,
        }
    }

    fn poll_idle(&mut self) -> PollOutcome {
        let Some(change) = self.sampler.poll_once() else {
            return PollOutcome::Quiet;
        };
        self.dispatch(CaptureEvent::Edge);
        self.clock.reset();
        self.baseline = 0;
        // The opening record carries no meaningful prior interval.
        if let RecordStatus::Rejected = self.buffer.record(change.channel, change.level, 0) {
            self.dispatch(CaptureEvent::RecordRejected);
            return PollOutcome::Sealed;
        }
        PollOutcome::Armed
    }

    fn poll_running(&mut self) -> PollOutcome {
        let Some(change) = self.sampler.poll_once() else {
            return PollOutcome::Quiet;
        };
        let now = self.clock.elapsed();
        let delta = now.wrapping_sub(self.baseline);
        // The baseline moves to the detection instant whether or not the
        // record is admitted.
        self.baseline = now;
        match self.buffer.record(change.channel, change.level, delta) {
            RecordStatus::Admitted => PollOutcome::Recorded,
            RecordStatus::Rejected => {
                self.dispatch(CaptureEvent::RecordRejected);
                PollOutcome::Sealed
            }
        }
    }

    /// External-trigger stop. Effective only while the session is running;
    /// repeat triggers in any other phase are no-ops.
    pub fn request_stop(&mut self) -> bool {
        matches!(
            self.dispatch(CaptureEvent::TriggerStop),
            CaptureApplyStatus::Applied
        )
    }

    /// Acknowledge that the sealed buffer has been replayed; Full to
    /// Stopped.
    pub fn mark_drained(&mut self) -> bool {
        matches!(
            self.dispatch(CaptureEvent::Drained),
            CaptureApplyStatus::Applied
        )
    }

    /// Explicit restart: Stopped back to Idle with the arena cleared and
    /// the line baselines re-sampled from hardware.
    pub fn rearm(&mut self) -> bool {
        if !matches!(
            self.dispatch(CaptureEvent::Rearm),
            CaptureApplyStatus::Applied
        ) {
            return false;
        }
        self.sampler.rearm();
        self.buffer.clear();
        self.baseline = 0;
        true
    }

    /// Levels the watched lines held when the session was armed.
    pub fn start_levels(&self) -> [Level; CHANNEL_COUNT] {
        self.sampler.start_levels()
    }

    /// The packed log recorded so far.
    pub fn recorded(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn recorded_len(&self) -> usize {
        self.buffer.len()
    }

    fn dispatch(&mut self, event: CaptureEvent) -> CaptureApplyStatus {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        context.status
    }
}
