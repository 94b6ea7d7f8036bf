//! Listing view: fetch every post once, render cards or the empty state.

use std::sync::Arc;

use blogdesk_api_types::Post;
use tracing::{debug, instrument, warn};

use super::cancel::CancelToken;
use super::service::{PostService, ServiceError};
use super::ui::{Notification, Notifier, SummaryRenderer};

pub const HEADING: &str = "Latest Posts";
pub const EMPTY_TEXT: &str = "No posts available";
pub const DIALOG_TITLE: &str = "Home";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty,
    Cards(usize),
}

pub struct ListView {
    service: Arc<dyn PostService>,
    notifier: Arc<dyn Notifier>,
    posts: Vec<Post>,
    mounted: bool,
    cancel: CancelToken,
}

impl ListView {
    pub fn new(service: Arc<dyn PostService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            posts: Vec::new(),
            mounted: false,
            cancel: CancelToken::new(),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Fetch the posts. Only the first call touches the network.
    #[instrument(skip(self))]
    pub async fn mount(&mut self) -> Result<(), ServiceError> {
        if self.mounted {
            return Ok(());
        }
        self.mounted = true;

        let result = self.service.get_all(&self.cancel).await;
        if self.cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        match result {
            Ok(response) => {
                debug!(status = response.status, count = response.data.len(), "posts loaded");
                self.posts = response.data;
                Ok(())
            }
            Err(ServiceError::Cancelled) => Err(ServiceError::Cancelled),
            Err(err) => {
                warn!(error = %err, "failed to load posts");
                self.notifier
                    .notify(Notification::error(DIALOG_TITLE, err.user_message()));
                Err(err)
            }
        }
    }

    pub fn render(&self, renderer: &dyn SummaryRenderer) -> Listing {
        renderer.heading(HEADING);
        if self.posts.is_empty() {
            renderer.empty_state(EMPTY_TEXT);
            return Listing::Empty;
        }
        for post in &self.posts {
            renderer.card(post);
        }
        Listing::Cards(self.posts.len())
    }

    pub fn teardown(&mut self) {
        self.cancel.cancel();
    }
}

impl Drop for ListView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
