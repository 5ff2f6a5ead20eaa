//! Host collaborators: input collection and notifications.

use notesmith_types::UserInstructions;

use crate::Notice;

/// Result of asking the user for instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Submitted(UserInstructions),
    /// The user dismissed the input surface. Not an error.
    Cancelled,
}

/// One-field text entry surface.
///
/// Implementations keep asking while the user submits blank text, reporting
/// [`Notice::EmptyPrompt`] through `notices` each time, and return only a
/// non-blank submission or a cancellation.
pub trait InputCollector {
    fn collect(&mut self, notices: &mut dyn NotificationSink) -> InputOutcome;
}

/// Handle for a notice that stays visible until dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersistentNoticeId(u64);

impl PersistentNoticeId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

pub trait NotificationSink {
    /// Show a transient notice.
    fn notify(&mut self, notice: &Notice);

    /// Show a notice with no timeout. It stays until [`Self::dismiss`] is called with the returned id.
    fn show_persistent(&mut self, notice: &Notice) -> PersistentNoticeId;

    fn dismiss(&mut self, id: PersistentNoticeId);
}

/// Loading notice that is dismissed exactly once.
///
/// [`LoadingIndicator::dismiss`] consumes the guard. If the guard is dropped
/// without it (early return, cancelled future, panic unwinding through an
/// await) `Drop` dismisses instead.
pub struct LoadingIndicator<'a, N: NotificationSink + ?Sized> {
    sink: &'a mut N,
    id: Option<PersistentNoticeId>,
}

impl<'a, N: NotificationSink + ?Sized> LoadingIndicator<'a, N> {
    pub fn show(sink: &'a mut N, notice: &Notice) -> Self {
        let id = sink.show_persistent(notice);
        tracing::debug!(notice_id = id.get(), "Loading indicator shown");
        Self { sink, id: Some(id) }
    }

    pub fn dismiss(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.sink.dismiss(id);
            tracing::debug!(notice_id = id.get(), "Loading indicator dismissed");
        }
    }
}

impl<N: NotificationSink + ?Sized> Drop for LoadingIndicator<'_, N> {
    fn drop(&mut self) {
        self.release();
    }
}
