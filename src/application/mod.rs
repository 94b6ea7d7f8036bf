//! View-models and the service seam they drive.

pub mod cancel;
pub mod create;
pub mod edit;
pub mod listing;
pub mod preview;
pub mod service;
pub mod submission;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use cancel::{CancelToken, Cancelled};
pub use create::CreateView;
pub use edit::{EditPhase, EditView, LoadOutcome};
pub use listing::{ListView, Listing};
pub use preview::{CoverPreview, ObjectUrl, PreviewRegistry};
pub use service::{PostPayload, PostService, ServiceError, ServiceResponse};
pub use submission::{SubmitOutcome, SubmitPhase};
pub use ui::{Navigator, Notification, NotificationKind, Notifier, Route, SummaryRenderer};
