//! Content Module
//!
//! Read-through loading of storefront content: cache first, then the REST
//! backend, then bundled demo content.

mod key;
mod loader;
mod source;

pub use key::{content_key, variants_pattern, Filters};
pub use loader::{load_fallbacks, Content, ContentLoader};
pub use source::{ContentSource, HttpContentSource};
