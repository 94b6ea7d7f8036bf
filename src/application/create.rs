//! Create view: empty draft, object-URL cover preview, submit to `POST /posts`.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::cancel::CancelToken;
use super::preview::{CoverPreview, PreviewRegistry};
use super::service::{PostPayload, PostService, ServiceError};
use super::submission::{InFlight, SubmitOutcome, SubmitPhase};
use super::ui::{Navigator, Notification, Notifier, Route};
use crate::domain::{Draft, FieldUpdate, RequiredField};

pub const DIALOG_TITLE: &str = "Add new post";
pub const CREATED_TEXT: &str = "Post created successfully!";
pub const FALLBACK_ERROR_TEXT: &str = "Request failed";
pub const TITLE_REQUIRED_TEXT: &str = "Title is required";

const REQUIRED: &[RequiredField] = &[RequiredField::Title];

pub struct CreateView {
    service: Arc<dyn PostService>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    previews: PreviewRegistry,
    placeholder: String,
    draft: Draft,
    preview: CoverPreview,
    phase: SubmitPhase,
    cancel: CancelToken,
}

impl CreateView {
    pub fn new(
        service: Arc<dyn PostService>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        previews: PreviewRegistry,
        placeholder: impl Into<String>,
    ) -> Self {
        let placeholder = placeholder.into();
        Self {
            service,
            notifier,
            navigator,
            previews,
            preview: CoverPreview::Placeholder(placeholder.clone()),
            placeholder,
            draft: Draft::empty(),
            phase: SubmitPhase::default(),
            cancel: CancelToken::new(),
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn preview(&self) -> &CoverPreview {
        &self.preview
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    /// Handle that unmounts this view from elsewhere, e.g. a signal handler.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        if let FieldUpdate::Cover(cover) = &update {
            // Assigning drops the old preview, which revokes its object URL.
            self.preview = match cover {
                Some(file) => CoverPreview::Object(self.previews.create_object_url(file)),
                None => CoverPreview::Placeholder(self.placeholder.clone()),
            };
        }
        self.draft.apply(update);
    }

    pub fn reset(&mut self) {
        self.draft = Draft::empty();
        self.preview = CoverPreview::Placeholder(self.placeholder.clone());
    }

    #[instrument(skip(self), fields(title = %self.draft.title))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Err(err) = self.draft.ensure_filled(REQUIRED) {
            self.notifier
                .notify(Notification::error(DIALOG_TITLE, TITLE_REQUIRED_TEXT));
            self.phase = SubmitPhase::Idle {
                last_error: Some(TITLE_REQUIRED_TEXT.to_string()),
            };
            return SubmitOutcome::Invalid(err);
        }

        let payload = PostPayload::from_draft(&self.draft);
        let flight = InFlight::begin(&mut self.phase);
        let result = self.service.create(payload, &self.cancel).await;

        if self.cancel.is_cancelled() {
            info!("create view torn down before the response arrived; discarding it");
            return SubmitOutcome::Cancelled;
        }

        match result {
            Ok(response) if matches!(response.status, 200 | 201) => {
                self.notifier
                    .notify(Notification::success(DIALOG_TITLE, CREATED_TEXT));
                self.draft = Draft::empty();
                self.preview = CoverPreview::Placeholder(self.placeholder.clone());
                self.navigator.navigate(Route::Listing);
                flight.succeed(Route::Listing);
                info!(status = response.status, "post created");
                SubmitOutcome::Succeeded(Route::Listing)
            }
            Ok(response) => {
                warn!(status = response.status, "create returned an unexpected status");
                self.notifier
                    .notify(Notification::error(DIALOG_TITLE, FALLBACK_ERROR_TEXT));
                flight.fail(FALLBACK_ERROR_TEXT);
                SubmitOutcome::Unexpected {
                    status: response.status,
                }
            }
            Err(ServiceError::Cancelled) => SubmitOutcome::Cancelled,
            Err(err) => {
                warn!(error = %err, "create post failed");
                let text = err.server_message().unwrap_or(FALLBACK_ERROR_TEXT).to_string();
                self.notifier
                    .notify(Notification::error(DIALOG_TITLE, text.clone()));
                flight.fail(text);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Unmount: abandon any in-flight request and release the preview URL.
    pub fn teardown(&mut self) {
        self.cancel.cancel();
        self.preview = CoverPreview::Blank;
    }
}

impl Drop for CreateView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::service::ServiceResponse;
    use crate::application::testing::{Call, Event, FakePostService, Recorder, created};
    use crate::domain::CoverFile;

    struct Harness {
        service: Arc<FakePostService>,
        ui: Arc<Recorder>,
        previews: PreviewRegistry,
        view: CreateView,
    }

    fn harness(service: FakePostService) -> Harness {
        let service = Arc::new(service);
        let ui = Arc::new(Recorder::default());
        let previews = PreviewRegistry::new();
        let view = CreateView::new(
            service.clone(),
            ui.clone(),
            ui.clone(),
            previews.clone(),
            "https://placeholder.example/cover.jpg",
        );
        Harness {
            service,
            ui,
            previews,
            view,
        }
    }

    fn cover(name: &str) -> CoverFile {
        CoverFile::from_bytes(name, vec![1_u8, 2, 3]).expect("cover")
    }

    fn fill(view: &mut CreateView) {
        view.apply(FieldUpdate::Title("Hello".into()));
        view.apply(FieldUpdate::Content("<p>World</p>".into()));
    }

    #[tokio::test]
    async fn created_post_resets_draft_and_navigates_once() {
        let mut h = harness(FakePostService::new().with_create(created()));
        fill(&mut h.view);

        let outcome = h.view.submit().await;

        assert_eq!(outcome, SubmitOutcome::Succeeded(Route::Listing));
        assert!(h.view.draft().is_empty());
        assert!(h.view.preview().is_placeholder());
        assert_eq!(h.view.phase(), &SubmitPhase::Navigated(Route::Listing));
        assert_eq!(
            h.ui.events(),
            vec![
                Event::Notified(Notification::success(DIALOG_TITLE, CREATED_TEXT)),
                Event::Navigated(Route::Listing),
            ]
        );
    }

    #[tokio::test]
    async fn payload_without_cover_omits_cover_field() {
        let mut h = harness(FakePostService::new().with_create(created()));
        fill(&mut h.view);
        h.view.submit().await;

        let calls = h.service.calls();
        let [Call::Create(payload)] = calls.as_slice() else {
            panic!("expected exactly one create call");
        };
        assert_eq!(payload.field_names(), vec!["title", "summary", "content"]);
        assert_eq!(payload.title, "Hello");
        assert_eq!(payload.summary, "");
        assert_eq!(payload.content, "<p>World</p>");
    }

    #[tokio::test]
    async fn plain_200_also_counts_as_created() {
        let mut h = harness(
            FakePostService::new()
                .with_create(Ok(ServiceResponse::new(200, serde_json::Value::Null))),
        );
        fill(&mut h.view);
        assert!(h.view.submit().await.is_success());
    }

    #[tokio::test]
    async fn server_failure_keeps_draft_and_shows_message() {
        let mut h = harness(FakePostService::new().with_create(Err(ServiceError::Server {
            status: 400,
            message: Some("Cover too large".into()),
        })));
        fill(&mut h.view);
        h.view.apply(FieldUpdate::Summary("short".into()));
        h.view.apply(FieldUpdate::Cover(Some(cover("c.png"))));
        let before = h.view.draft().clone();

        let outcome = h.view.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(h.view.draft(), &before);
        assert_eq!(h.view.phase().last_error(), Some("Cover too large"));
        assert_eq!(
            h.ui.notifications(),
            vec![Notification::error(DIALOG_TITLE, "Cover too large")]
        );
        assert!(h.ui.routes().is_empty());
    }

    #[tokio::test]
    async fn network_failure_uses_generic_text() {
        let mut h = harness(
            FakePostService::new()
                .with_create(Err(ServiceError::Network("connection refused".into()))),
        );
        fill(&mut h.view);
        h.view.submit().await;

        assert_eq!(
            h.ui.notifications(),
            vec![Notification::error(DIALOG_TITLE, FALLBACK_ERROR_TEXT)]
        );
        assert_eq!(h.view.draft().title, "Hello");
    }

    #[tokio::test]
    async fn unexpected_success_status_is_not_treated_as_created() {
        let mut h = harness(
            FakePostService::new()
                .with_create(Ok(ServiceResponse::new(204, serde_json::Value::Null))),
        );
        fill(&mut h.view);

        let outcome = h.view.submit().await;

        assert_eq!(outcome, SubmitOutcome::Unexpected { status: 204 });
        assert_eq!(h.view.draft().title, "Hello");
        assert!(h.ui.routes().is_empty());
    }

    #[tokio::test]
    async fn blank_title_never_reaches_the_service() {
        let mut h = harness(FakePostService::new().with_create(created()));
        h.view.apply(FieldUpdate::Content("<p>body</p>".into()));

        let outcome = h.view.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(h.service.calls().is_empty());
        assert_eq!(
            h.ui.notifications(),
            vec![Notification::error(DIALOG_TITLE, TITLE_REQUIRED_TEXT)]
        );
    }

    #[tokio::test]
    async fn response_after_teardown_is_discarded() {
        let mut h = harness(
            FakePostService::new()
                .with_create(created())
                .cancelling_during_call(),
        );
        fill(&mut h.view);

        let outcome = h.view.submit().await;

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert!(h.ui.events().is_empty());
        assert_eq!(h.view.draft().title, "Hello");
        assert_eq!(h.view.phase(), &SubmitPhase::default());
    }

    #[test]
    fn cover_previews_never_leak_object_urls() {
        let mut h = harness(FakePostService::new());

        h.view.apply(FieldUpdate::Cover(Some(cover("a.png"))));
        h.view.apply(FieldUpdate::Cover(Some(cover("b.png"))));
        assert_eq!(h.previews.live_count(), 1);
        let src = h.view.preview().src().expect("src").to_string();
        assert_eq!(
            h.previews.resolve(&src).map(|c| c.file_name().to_string()),
            Some("b.png".into())
        );

        h.view.apply(FieldUpdate::Cover(None));
        assert_eq!(h.previews.live_count(), 0);
        assert!(h.view.preview().is_placeholder());

        h.view.apply(FieldUpdate::Cover(Some(cover("c.png"))));
        h.view.reset();
        assert_eq!(h.previews.live_count(), 0);

        h.view.apply(FieldUpdate::Cover(Some(cover("d.png"))));
        h.view.teardown();
        assert_eq!(h.previews.live_count(), 0);
        assert!(h.view.cancel_token().is_cancelled());
    }

    #[test]
    fn dropping_view_releases_preview() {
        let h = harness(FakePostService::new());
        let Harness {
            previews, mut view, ..
        } = h;
        view.apply(FieldUpdate::Cover(Some(cover("a.png"))));
        let token = view.cancel_token();
        drop(view);
        assert_eq!(previews.live_count(), 0);
        assert!(token.is_cancelled());
    }
}
