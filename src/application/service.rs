//! The post service seam: four remote operations, no retries.

use async_trait::async_trait;
use blogdesk_api_types::{Post, fields};
use thiserror::Error;

use super::cancel::{CancelToken, Cancelled};
use crate::domain::{CoverFile, Draft};

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse<T> {
    pub status: u16,
    pub data: T,
}

impl<T> ServiceResponse<T> {
    pub fn new(status: u16, data: T) -> Self {
        Self { status, data }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid request: {0}")]
    Request(String),
    #[error("request failed with status code {status}")]
    Server { status: u16, message: Option<String> },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
}

impl ServiceError {
    /// Message supplied by the server in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Server message when present, otherwise this error's own description.
    pub fn user_message(&self) -> String {
        self.server_message()
            .map_or_else(|| self.to_string(), str::to_string)
    }
}

impl From<Cancelled> for ServiceError {
    fn from(_: Cancelled) -> Self {
        ServiceError::Cancelled
    }
}

/// Multipart body sent by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPayload {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub cover: Option<CoverFile>,
}

impl PostPayload {
    /// Package a draft. Only a newly chosen file becomes `cover`.
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            title: draft.title.clone(),
            summary: draft.summary.clone(),
            content: draft.content.clone(),
            cover: draft.cover_file.clone(),
        }
    }

    /// Field names in the order they are written to the form.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec![fields::TITLE, fields::SUMMARY, fields::CONTENT];
        if self.cover.is_some() {
            names.push(fields::COVER);
        }
        names
    }
}

#[async_trait]
pub trait PostService: Send + Sync {
    async fn create(
        &self,
        payload: PostPayload,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<serde_json::Value>, ServiceError>;

    async fn get_by_id(
        &self,
        id: &str,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<Post>, ServiceError>;

    async fn get_all(&self, cancel: &CancelToken)
    -> Result<ServiceResponse<Vec<Post>>, ServiceError>;

    async fn update(
        &self,
        id: &str,
        payload: PostPayload,
        cancel: &CancelToken,
    ) -> Result<ServiceResponse<serde_json::Value>, ServiceError>;
}
