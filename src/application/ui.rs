//! Presentation collaborators the views talk to: dialogs, routing, cards.

use std::fmt;

use blogdesk_api_types::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// A modal dialog: title plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub text: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing,
    PostDetail(String),
    /// One step back in history.
    Back,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Listing => "/".to_string(),
            Route::PostDetail(id) => format!("/post/{id}"),
            Route::Back => "..".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Fire-and-forget dialog presenter.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Renders the listing page: a heading, then cards or the empty state.
pub trait SummaryRenderer {
    fn heading(&self, text: &str);
    fn empty_state(&self, text: &str);
    fn card(&self, post: &Post);
}
