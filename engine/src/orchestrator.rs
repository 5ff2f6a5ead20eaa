//! End-to-end coordination of one refinement request.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use notesmith_providers::GenerationClient;
use notesmith_types::GenerationCredential;

use crate::editor::{DocumentProvider, select_content, write_content};
use crate::host::{InputCollector, InputOutcome, LoadingIndicator, NotificationSink};
use crate::prompt::build_prompt;
use crate::state::{RequestPhase, RequestState, Transition};
use crate::{Notice, OrchestrationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The generated text replaced the document.
    Applied,
    /// The backend answered with empty text. Nothing was written.
    EmptyResult,
    /// The user cancelled input.
    Cancelled,
    /// Another request was already in flight; this trigger was rejected.
    Busy,
    Failed(OrchestrationError),
}

impl RequestOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::EmptyResult => "empty_result",
            Self::Cancelled => "cancelled",
            Self::Busy => "busy",
            Self::Failed(_) => "failed",
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What happened during one [`RequestOrchestrator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReport {
    pub outcome: RequestOutcome,
    pub transitions: Vec<Transition>,
}

impl RequestReport {
    /// Phases visited after the initial `Idle`, in order.
    #[must_use]
    pub fn phases(&self) -> Vec<RequestPhase> {
        self.transitions.iter().map(|t| t.to).collect()
    }
}

/// Holds the single in-flight slot until dropped.
struct InFlightSlot<'a>(&'a AtomicBool);

impl<'a> InFlightSlot<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Coordinates input, content extraction, prompt building, generation and
/// write-back for each user trigger.
///
/// At most one request runs at a time per orchestrator. A trigger that
/// arrives while one is outstanding gets [`RequestOutcome::Busy`] and a
/// [`Notice::Busy`]; nothing is queued.
#[derive(Debug)]
pub struct RequestOrchestrator<G> {
    client: G,
    in_flight: AtomicBool,
    next_request_id: AtomicU64,
}

impl<G: GenerationClient> RequestOrchestrator<G> {
    #[must_use]
    pub fn new(client: G) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
            next_request_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub fn client(&self) -> &G {
        &self.client
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one orchestration.
    ///
    /// `credential` is the configuration snapshot for this request. The loading
    /// notice is shown only while the generation call is outstanding and is
    /// dismissed exactly once on every exit path.
    pub async fn run<I, D, N>(
        &self,
        credential: GenerationCredential,
        input: &mut I,
        documents: &mut D,
        notices: &mut N,
    ) -> RequestReport
    where
        I: InputCollector + ?Sized,
        D: DocumentProvider + ?Sized,
        N: NotificationSink,
    {
        let Some(_slot) = InFlightSlot::acquire(&self.in_flight) else {
            tracing::warn!("Rejected trigger: a request is already in flight");
            notices.notify(&Notice::Busy);
            return RequestReport {
                outcome: RequestOutcome::Busy,
                transitions: Vec::new(),
            };
        };

        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let mut state = RequestState::new(request_id);
        let outcome = self
            .drive(&mut state, &credential, input, documents, notices)
            .await;
        tracing::info!(request_id, outcome = outcome.as_str(), "Request finished");

        RequestReport {
            outcome,
            transitions: state.into_transitions(),
        }
    }

    async fn drive<I, D, N>(
        &self,
        state: &mut RequestState,
        credential: &GenerationCredential,
        input: &mut I,
        documents: &mut D,
        notices: &mut N,
    ) -> RequestOutcome
    where
        I: InputCollector + ?Sized,
        D: DocumentProvider + ?Sized,
        N: NotificationSink,
    {
        if !credential.has_secret() {
            return fail(state, notices, OrchestrationError::MissingCredential);
        }

        state.advance(RequestPhase::CollectingInput);
        let instructions = match input.collect(notices) {
            InputOutcome::Submitted(instructions) => instructions,
            InputOutcome::Cancelled => {
                state.advance(RequestPhase::AbortedEarly);
                state.advance(RequestPhase::Idle);
                return RequestOutcome::Cancelled;
            }
        };

        state.advance(RequestPhase::ExtractingContent);
        let Some(notes) = select_content(documents.active_editor().as_deref()) else {
            return fail(state, notices, OrchestrationError::NoActiveEditor);
        };

        state.advance(RequestPhase::GeneratingPrompt);
        let prompt = build_prompt(&instructions, &notes);
        tracing::debug!(
            request_id = state.request_id(),
            prompt_bytes = prompt.len(),
            notes_bytes = notes.as_str().len(),
            "Built prompt"
        );

        state.advance(RequestPhase::AwaitingGeneration);
        let loading = LoadingIndicator::show(
            &mut *notices,
            &Notice::Generating {
                model: credential.model(),
            },
        );
        let result = self.client.generate(&prompt, credential).await;
        loading.dismiss();

        let text = match result {
            Ok(text) => text,
            Err(err) => return fail(state, notices, OrchestrationError::Generation(err)),
        };
        if text.is_empty() {
            state.advance(RequestPhase::Failed);
            notices.notify(&Notice::EmptyResponse);
            state.advance(RequestPhase::Idle);
            return RequestOutcome::EmptyResult;
        }

        state.advance(RequestPhase::ApplyingResult);
        if let Err(err) = write_content(documents.active_editor(), &text) {
            return fail(state, notices, err);
        }
        notices.notify(&Notice::ResponseApplied);
        state.advance(RequestPhase::Idle);
        RequestOutcome::Applied
    }
}

fn fail<N: NotificationSink>(
    state: &mut RequestState,
    notices: &mut N,
    error: OrchestrationError,
) -> RequestOutcome {
    tracing::warn!(request_id = state.request_id(), %error, "Request failed");
    state.advance(RequestPhase::Failed);
    notices.notify(&error.notice());
    state.advance(RequestPhase::Idle);
    RequestOutcome::Failed(error)
}
