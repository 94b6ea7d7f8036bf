//! Domain layer types and invariants.

pub mod cover;
pub mod draft;
pub mod error;
pub mod session;

pub use cover::CoverFile;
pub use draft::{Draft, FieldUpdate, RequiredField};
pub use error::DraftError;
pub use session::SessionUser;
