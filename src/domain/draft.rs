//! Locally held, not-yet-persisted copy of a post.

use std::fmt;

use blogdesk_api_types::Post;

use super::cover::CoverFile;
use super::error::DraftError;

/// Fields a draft must carry before it can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Content,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            RequiredField::Title => "title",
            RequiredField::Content => "content",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single user edit to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Summary(String),
    /// Rich-text HTML from the editor; stored verbatim.
    Content(String),
    /// `None` clears a previously chosen file.
    Cover(Option<CoverFile>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub summary: String,
    pub content: String,
    /// Cover already stored on the server. Shown, never re-submitted.
    pub remote_cover: Option<String>,
    /// Newly chosen cover; the only cover that gets uploaded.
    pub cover_file: Option<CoverFile>,
}

impl Draft {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Hydrate a draft from a fetched post.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            summary: post.summary.clone(),
            content: post.content.clone(),
            remote_cover: post.cover.clone().filter(|cover| !cover.is_empty()),
            cover_file: None,
        }
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(title) => self.title = title,
            FieldUpdate::Summary(summary) => self.summary = summary,
            FieldUpdate::Content(content) => self.content = content,
            FieldUpdate::Cover(file) => self.cover_file = file,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Check that every field in `required` is non-blank.
    pub fn ensure_filled(&self, required: &[RequiredField]) -> Result<(), DraftError> {
        let missing: Vec<RequiredField> = required
            .iter()
            .copied()
            .filter(|field| self.value_of(*field).trim().is_empty())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DraftError::missing(missing))
        }
    }

    fn value_of(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::Title => &self.title,
            RequiredField::Content => &self.content,
        }
    }
}
