//! Edit view: load, ownership guard, then submit to `PUT /posts/{id}`.
//!
//! The ownership check only decides what this client shows. The server must
//! still refuse updates from anyone but the author.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::cancel::CancelToken;
use super::preview::{CoverPreview, data_url};
use super::service::{PostPayload, PostService, ServiceError};
use super::submission::{InFlight, SubmitOutcome, SubmitPhase};
use super::ui::{Navigator, Notification, Notifier, Route};
use crate::domain::{Draft, FieldUpdate, RequiredField, SessionUser};

pub const ERROR_TITLE: &str = "Error";
pub const SUCCESS_TITLE: &str = "Success";
pub const NOT_OWNER_TEXT: &str = "You are not allowed to edit this post";
pub const REQUIRED_TEXT: &str = "Title and content are required";
pub const UPDATED_TEXT: &str = "Post updated successfully";

const REQUIRED: &[RequiredField] = &[RequiredField::Title, RequiredField::Content];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPhase {
    Loading,
    /// Post loaded and owned by the session user; the form is shown.
    Ready,
    /// Post belongs to someone else; the form is never shown.
    Denied,
    /// The post could not be fetched.
    Unavailable { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    Denied,
    Unavailable(ServiceError),
    Cancelled,
    /// `mount` already ran.
    AlreadyMounted,
}

pub struct EditView {
    id: String,
    session: Option<SessionUser>,
    service: Arc<dyn PostService>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    phase: EditPhase,
    draft: Draft,
    preview: CoverPreview,
    submit_phase: SubmitPhase,
    cancel: CancelToken,
}

impl EditView {
    pub fn new(
        id: impl Into<String>,
        session: Option<SessionUser>,
        service: Arc<dyn PostService>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            id: id.into(),
            session,
            service,
            notifier,
            navigator,
            phase: EditPhase::Loading,
            draft: Draft::empty(),
            preview: CoverPreview::Blank,
            submit_phase: SubmitPhase::default(),
            cancel: CancelToken::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn submit_phase(&self) -> &SubmitPhase {
        &self.submit_phase
    }

    /// The form's fields, or `None` while no form is shown.
    pub fn form(&self) -> Option<&Draft> {
        matches!(self.phase, EditPhase::Ready).then_some(&self.draft)
    }

    pub fn preview(&self) -> &CoverPreview {
        &self.preview
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    #[instrument(skip(self), fields(post_id = %self.id))]
    pub async fn mount(&mut self) -> LoadOutcome {
        if !matches!(self.phase, EditPhase::Loading) {
            return LoadOutcome::AlreadyMounted;
        }

        let result = self.service.get_by_id(&self.id, &self.cancel).await;
        if self.cancel.is_cancelled() {
            return LoadOutcome::Cancelled;
        }

        let result = result.and_then(|response| match response.status {
            200 => Ok(response.data),
            status => Err(ServiceError::Server {
                status,
                message: None,
            }),
        });
        let post = match result {
            Ok(post) => post,
            Err(ServiceError::Cancelled) => return LoadOutcome::Cancelled,
            Err(err) => {
                warn!(error = %err, "failed to load post for editing");
                let message = err.user_message();
                self.notifier
                    .notify(Notification::error(ERROR_TITLE, message.clone()));
                self.phase = EditPhase::Unavailable { message };
                return LoadOutcome::Unavailable(err);
            }
        };

        let owned = self
            .session
            .as_ref()
            .is_some_and(|user| user.owns(post.author_id()));
        if !owned {
            info!(author = ?post.author_id(), "edit denied: session user is not the author");
            self.phase = EditPhase::Denied;
            self.notifier
                .notify(Notification::error(ERROR_TITLE, NOT_OWNER_TEXT));
            self.navigator.navigate(Route::Listing);
            return LoadOutcome::Denied;
        }

        self.draft = Draft::from_post(&post);
        self.preview = self
            .draft
            .remote_cover
            .clone()
            .map_or(CoverPreview::Blank, CoverPreview::Remote);
        self.phase = EditPhase::Ready;
        debug!("post loaded into edit form");
        LoadOutcome::Ready
    }

    /// Apply a field edit. Ignored unless the form is shown.
    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        if !matches!(self.phase, EditPhase::Ready) {
            return false;
        }

        if let FieldUpdate::Cover(cover) = &update {
            self.preview = match (cover, &self.draft.remote_cover) {
                (Some(file), _) => CoverPreview::Data(data_url(file)),
                (None, Some(remote)) => CoverPreview::Remote(remote.clone()),
                (None, None) => CoverPreview::Blank,
            };
        }
        self.draft.apply(update);
        true
    }

    #[instrument(skip(self), fields(post_id = %self.id))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !matches!(self.phase, EditPhase::Ready) {
            return SubmitOutcome::NotReady;
        }

        if let Err(err) = self.draft.ensure_filled(REQUIRED) {
            self.notifier
                .notify(Notification::error(ERROR_TITLE, REQUIRED_TEXT));
            self.submit_phase = SubmitPhase::Idle {
                last_error: Some(REQUIRED_TEXT.to_string()),
            };
            return SubmitOutcome::Invalid(err);
        }

        let payload = PostPayload::from_draft(&self.draft);
        let flight = InFlight::begin(&mut self.submit_phase);
        let result = self.service.update(&self.id, payload, &self.cancel).await;

        if self.cancel.is_cancelled() {
            info!("edit view torn down before the response arrived; discarding it");
            return SubmitOutcome::Cancelled;
        }

        match result {
            Ok(response) if response.status == 200 => {
                let route = Route::PostDetail(self.id.clone());
                self.notifier
                    .notify(Notification::success(SUCCESS_TITLE, UPDATED_TEXT));
                self.navigator.navigate(route.clone());
                flight.succeed(route.clone());
                info!("post updated");
                SubmitOutcome::Succeeded(route)
            }
            Ok(response) => {
                warn!(status = response.status, "update returned an unexpected status");
                let text = format!("unexpected response status {}", response.status);
                self.notifier
                    .notify(Notification::error(ERROR_TITLE, text.clone()));
                flight.fail(text);
                SubmitOutcome::Unexpected {
                    status: response.status,
                }
            }
            Err(ServiceError::Cancelled) => SubmitOutcome::Cancelled,
            Err(err) => {
                warn!(error = %err, "update post failed");
                let text = err.user_message();
                self.notifier
                    .notify(Notification::error(ERROR_TITLE, text.clone()));
                flight.fail(text);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// The form's Cancel button: leave without saving.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.navigator.navigate(Route::Back);
    }

    pub fn teardown(&mut self) {
        self.cancel.cancel();
        self.preview = CoverPreview::Blank;
    }
}

impl Drop for EditView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
