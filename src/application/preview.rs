//! Cover previews: scoped object URLs and inline data URLs.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::CoverFile;

const OBJECT_URL_PREFIX: &str = "blob:blogdesk/";

/// Tracks every object URL handed out for local cover previews.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<DashMap<Uuid, CoverFile>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `cover` and return a handle that revokes the URL when dropped.
    pub fn create_object_url(&self, cover: &CoverFile) -> ObjectUrl {
        let id = Uuid::new_v4();
        self.live.insert(id, cover.clone());
        tracing::trace!(%id, file = cover.file_name(), "object url created");
        ObjectUrl {
            id,
            href: format!("{OBJECT_URL_PREFIX}{id}"),
            live: Arc::clone(&self.live),
        }
    }

    /// Look up the file behind a live object URL.
    pub fn resolve(&self, href: &str) -> Option<CoverFile> {
        let id = href
            .strip_prefix(OBJECT_URL_PREFIX)
            .and_then(|raw| Uuid::parse_str(raw).ok())?;
        self.live.get(&id).map(|entry| entry.value().clone())
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// A live object URL. Dropping it revokes the URL.
#[derive(Debug)]
pub struct ObjectUrl {
    id: Uuid,
    href: String,
    live: Arc<DashMap<Uuid, CoverFile>>,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.href
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.live.remove(&self.id);
        tracing::trace!(id = %self.id, "object url revoked");
    }
}

/// Inline `data:` URL for a cover; owns no external resource.
pub fn data_url(cover: &CoverFile) -> String {
    format!(
        "data:{};base64,{}",
        cover.content_type().essence_str(),
        STANDARD.encode(cover.bytes())
    )
}

/// What the cover slot of a form currently shows.
#[derive(Debug, Default)]
pub enum CoverPreview {
    #[default]
    Blank,
    Placeholder(String),
    Remote(String),
    Object(ObjectUrl),
    Data(String),
}

impl CoverPreview {
    pub fn src(&self) -> Option<&str> {
        match self {
            CoverPreview::Blank => None,
            CoverPreview::Placeholder(src) | CoverPreview::Remote(src) | CoverPreview::Data(src) => {
                Some(src)
            }
            CoverPreview::Object(url) => Some(url.as_str()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CoverPreview::Placeholder(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover(name: &str) -> CoverFile {
        CoverFile::from_bytes(name, b"\x89PNG".to_vec()).expect("cover")
    }

    #[test]
    fn dropping_handle_revokes_url() {
        let registry = PreviewRegistry::new();
        let url = registry.create_object_url(&cover("a.png"));
        let href = url.as_str().to_string();

        assert!(href.starts_with("blob:blogdesk/"));
        assert_eq!(registry.resolve(&href).map(|c| c.file_name().to_string()), Some("a.png".into()));
        assert_eq!(registry.live_count(), 1);

        drop(url);
        assert_eq!(registry.live_count(), 0);
        assert!(registry.resolve(&href).is_none());
    }

    #[test]
    fn replacing_preview_releases_previous_url() {
        let registry = PreviewRegistry::new();
        let mut preview = CoverPreview::Object(registry.create_object_url(&cover("a.png")));
        let first = preview.src().map(str::to_string).expect("first src");
        preview = CoverPreview::Object(registry.create_object_url(&cover("b.png")));

        assert_eq!(registry.live_count(), 1);
        assert!(registry.resolve(&first).is_none());
        assert!(preview.src().is_some_and(|src| src.starts_with("blob:")));
    }

    #[test]
    fn data_url_embeds_mime_and_base64() {
        assert_eq!(data_url(&cover("x.png")), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn unknown_href_does_not_resolve() {
        let registry = PreviewRegistry::new();
        assert!(registry.resolve("https://cdn.example/a.png").is_none());
        assert!(registry.resolve("blob:blogdesk/not-a-uuid").is_none());
    }
}
