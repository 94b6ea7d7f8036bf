//! Submission state shared by the create and edit views.
//!
//! `idle → submitting → { navigated | idle (with message) }`. Views hold the
//! phase and drive transitions through an [`InFlight`] guard, so a submit
//! future that is dropped part-way leaves the view idle rather than stuck.

use super::service::ServiceError;
use super::ui::Route;
use crate::domain::DraftError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle { last_error: Option<String> },
    Submitting,
    Navigated(Route),
}

impl Default for SubmitPhase {
    fn default() -> Self {
        SubmitPhase::Idle { last_error: None }
    }
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitPhase::Submitting)
    }

    pub fn last_error(&self) -> Option<&str> {
        match self {
            SubmitPhase::Idle { last_error } => last_error.as_deref(),
            _ => None,
        }
    }
}

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded(Route),
    /// Local validation failed; nothing was sent.
    Invalid(DraftError),
    Failed(ServiceError),
    /// The server answered 2xx but not with a status this flow accepts.
    Unexpected { status: u16 },
    /// The view was torn down before the response arrived.
    Cancelled,
    /// The view is not in a state that accepts submissions.
    NotReady,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

/// Owns the `Submitting` phase for the duration of one request.
pub(crate) struct InFlight<'a> {
    phase: &'a mut SubmitPhase,
    settled: bool,
}

impl<'a> InFlight<'a> {
    pub(crate) fn begin(phase: &'a mut SubmitPhase) -> Self {
        *phase = SubmitPhase::Submitting;
        Self {
            phase,
            settled: false,
        }
    }

    pub(crate) fn succeed(mut self, route: Route) {
        *self.phase = SubmitPhase::Navigated(route);
        self.settled = true;
    }

    pub(crate) fn fail(mut self, message: impl Into<String>) {
        *self.phase = SubmitPhase::Idle {
            last_error: Some(message.into()),
        };
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.phase = SubmitPhase::default();
        }
    }
}
