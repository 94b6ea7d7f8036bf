//! Identity of the signed-in user, supplied by whoever owns authentication.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionUser {
    pub id: String,
}

impl SessionUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Whether this user authored a post with the given author id.
    pub fn owns(&self, author_id: Option<&str>) -> bool {
        author_id.is_some_and(|author| author == self.id)
    }
}
