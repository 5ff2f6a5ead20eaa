//! Request state machine types.

use std::fmt;

/// Phase of a single orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPhase {
    Idle,
    CollectingInput,
    ExtractingContent,
    GeneratingPrompt,
    AwaitingGeneration,
    ApplyingResult,
    /// The user cancelled input. Silent.
    AbortedEarly,
    Failed,
}

impl RequestPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CollectingInput => "collecting_input",
            Self::ExtractingContent => "extracting_content",
            Self::GeneratingPrompt => "generating_prompt",
            Self::AwaitingGeneration => "awaiting_generation",
            Self::ApplyingResult => "applying_result",
            Self::AbortedEarly => "aborted_early",
            Self::Failed => "failed",
        }
    }

    /// Whether `self -> next` is an edge of the request state machine.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::CollectingInput | Self::Failed)
                | (
                    Self::CollectingInput,
                    Self::ExtractingContent | Self::AbortedEarly
                )
                | (Self::ExtractingContent, Self::GeneratingPrompt | Self::Failed)
                | (Self::GeneratingPrompt, Self::AwaitingGeneration)
                | (Self::AwaitingGeneration, Self::ApplyingResult | Self::Failed)
                | (Self::ApplyingResult, Self::Idle | Self::Failed)
                | (Self::AbortedEarly | Self::Failed, Self::Idle)
        )
    }
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: RequestPhase,
    pub to: RequestPhase,
}

/// Transient state of one orchestration. Never persisted.
///
/// Each phase change is recorded and emitted as a `tracing` event on the
/// `notesmith::request` target, so tests and log readers see the same
/// sequence.
#[derive(Debug)]
pub struct RequestState {
    request_id: u64,
    phase: RequestPhase,
    transitions: Vec<Transition>,
}

impl RequestState {
    #[must_use]
    pub fn new(request_id: u64) -> Self {
        Self {
            request_id,
            phase: RequestPhase::Idle,
            transitions: Vec::new(),
        }
    }

    #[must_use]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    #[must_use]
    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    #[must_use]
    pub fn into_transitions(self) -> Vec<Transition> {
        self.transitions
    }

    pub(crate) fn advance(&mut self, to: RequestPhase) {
        let from = self.phase;
        debug_assert!(
            from.can_transition_to(to),
            "invalid request transition {from} -> {to}"
        );
        tracing::info!(
            target: "notesmith::request",
            request_id = self.request_id,
            from = from.as_str(),
            to = to.as_str(),
            "Request phase changed"
        );
        self.phase = to;
        self.transitions.push(Transition { from, to });
    }
}
