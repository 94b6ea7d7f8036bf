//! Terminal stand-ins for dialogs, routing, and post cards.
//! Dialogs go to stderr; routes and cards go to stdout.

#![deny(clippy::all, clippy::pedantic)]

use blogdesk::application::{Navigator, Notification, NotificationKind, Notifier, Route, SummaryRenderer};
use blogdesk_api_types::Post;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

pub struct Console {
    placeholder: String,
}

impl Console {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }
}

impl Notifier for Console {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", dialog_line(&notification));
    }
}

impl Navigator for Console {
    fn navigate(&self, route: Route) {
        println!("→ {}", route.path());
    }
}

impl SummaryRenderer for Console {
    fn heading(&self, text: &str) {
        println!("{text}\n");
    }

    fn empty_state(&self, text: &str) {
        println!("{text}");
    }

    fn card(&self, post: &Post) {
        println!("{}\n", card_text(post, &self.placeholder));
    }
}

pub fn dialog_line(notification: &Notification) -> String {
    let mark = match notification.kind {
        NotificationKind::Success => '✔',
        NotificationKind::Error => '✖',
    };
    format!("{mark} {}: {}", notification.title, notification.text)
}

pub fn card_text(post: &Post, placeholder: &str) -> String {
    let mut lines = vec![post.title.clone()];

    let mut byline = Vec::new();
    if let Some(date) = post.created_at.as_deref().map(display_date) {
        byline.push(date);
    }
    if let Some(name) = post.author.as_ref().and_then(|author| author.username()) {
        byline.push(format!("by {name}"));
    }
    if !byline.is_empty() {
        lines.push(byline.join(" · "));
    }

    if !post.summary.trim().is_empty() {
        lines.push(post.summary.clone());
    }

    let cover = post
        .cover
        .as_deref()
        .filter(|cover| !cover.trim().is_empty())
        .unwrap_or(placeholder);
    lines.push(format!("cover: {cover}"));
    lines.push(format!("id: {}", post.id));

    lines.join("\n")
}

/// `2024-05-01T10:00:00Z` → `May 1, 2024`. Anything unparsable is shown as-is.
fn display_date(raw: &str) -> String {
    let format = format_description!("[month repr:long] [day padding:none], [year]");
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|date| date.format(&format).ok())
        .unwrap_or_else(|| raw.to_string())
}
