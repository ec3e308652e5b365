use statig::prelude::*;

use super::types::Phase;

/// Inputs the polling loop feeds into the session machine.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum CaptureEvent {
    /// A watched line changed level.
    Edge,
    /// The encoder refused the record; the arena is exhausted.
    RecordRejected,
    /// The external stop trigger fired.
    TriggerStop,
    /// The sealed buffer has been replayed.
    Drained,
    /// Explicit restart into a fresh session.
    Rearm,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum CaptureApplyStatus {
    Applied,
    Ignored,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CaptureMachine {
    pub(crate) phase: Phase,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct DispatchContext {
    pub(crate) status: CaptureApplyStatus,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self {
            status: CaptureApplyStatus::Ignored,
        }
    }
}

impl CaptureMachine {
    pub(crate) fn new() -> Self {
        Self { phase: Phase::Idle }
    }
}

#[state_machine(initial = "State::idle()")]
impl CaptureMachine {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &CaptureEvent) -> Outcome<State> {
        match event {
            CaptureEvent::Edge => {
                self.phase = Phase::Running;
                context.status = CaptureApplyStatus::Applied;
                Transition(State::running())
            }
            // The stop trigger is gated to a running session.
            _ => Handled,
        }
    }

    #[state]
    fn running(&mut self, context: &mut DispatchContext, event: &CaptureEvent) -> Outcome<State> {
        match event {
            CaptureEvent::Edge => {
                context.status = CaptureApplyStatus::Applied;
                Handled
            }
            CaptureEvent::RecordRejected | CaptureEvent::TriggerStop => {
                self.phase = Phase::Full;
                context.status = CaptureApplyStatus::Applied;
                Transition(State::full())
            }
            _ => Handled,
        }
    }

    #[state]
    fn full(&mut self, context: &mut DispatchContext, event: &CaptureEvent) -> Outcome<State> {
        match event {
            CaptureEvent::Drained => {
                self.phase = Phase::Stopped;
                context.status = CaptureApplyStatus::Applied;
                Transition(State::stopped())
            }
            _ => Handled,
        }
    }

    #[state]
    fn stopped(&mut self, context: &mut DispatchContext, event: &CaptureEvent) -> Outcome<State> {
        match event {
            CaptureEvent::Rearm => {
                self.phase = Phase::Idle;
                context.status = CaptureApplyStatus::Applied;
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}
