//! Request and response shapes for the blog content API.
//!
//! The API stores documents with a Mongo-style `_id` and camel-cased
//! timestamps; these types keep Rust field names and map them with serde.

use serde::{Deserialize, Deserializer, Serialize};

/// Multipart field names accepted by `POST /posts` and `PUT /posts/{id}`.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const SUMMARY: &str = "summary";
    pub const CONTENT: &str = "content";
    pub const COVER: &str = "cover";
}

/// A post as returned by `GET /posts` and `GET /posts/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

impl Post {
    /// Identity of the author, if the server embedded one.
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref().map(AuthorRef::id)
    }
}

/// Document stores write `null` for cleared text fields.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Author reference: either a populated user document or a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Embedded(AuthorSummary),
    Id(String),
}

impl AuthorRef {
    pub fn id(&self) -> &str {
        match self {
            AuthorRef::Embedded(author) => &author.id,
            AuthorRef::Id(id) => id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthorRef::Embedded(author) => author.username.as_deref(),
            AuthorRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Error payload; every field is optional because servers disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
