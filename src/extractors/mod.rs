//! Request extractors shared by handlers.

pub mod content_type;

pub use content_type::{RequireJson, JSON_MEDIA_TYPE};
