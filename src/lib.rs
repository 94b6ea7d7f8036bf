//! blogdesk: view-models and HTTP plumbing for writing, editing, and listing blog posts.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
