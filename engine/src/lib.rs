//! Core engine for notesmith - request state machine and orchestration.
//!
//! This crate owns the refinement workflow without any terminal or file
//! dependencies. Hosts plug in through the collaborator traits:
//!
//! - [`DocumentProvider`] / [`EditorContext`] - the active document
//! - [`InputCollector`] - the instruction entry surface
//! - [`NotificationSink`] - transient and persistent notices
//!
//! and drive a [`RequestOrchestrator`] once per user trigger.

mod editor;
mod error;
mod host;
mod notices;
mod orchestrator;
mod prompt;
mod state;

pub use editor::{DocumentProvider, EditorContext, TextBuffer, select_content, write_content};
pub use error::OrchestrationError;
pub use host::{
    InputCollector, InputOutcome, LoadingIndicator, NotificationSink, PersistentNoticeId,
};
pub use notices::{Notice, NoticeLevel};
pub use orchestrator::{RequestOrchestrator, RequestOutcome, RequestReport};
pub use prompt::build_prompt;
pub use state::{RequestPhase, RequestState, Transition};

// Re-export from crates for public API
pub use notesmith_providers::{
    self, GeminiClient, GenerationClient, GenerationError, GenerationResult,
};
pub use notesmith_types::{
    ApiKey, EmptyStringError, GeminiModel, GenerationCredential, NotesContent, Prompt,
    UserInstructions,
};
