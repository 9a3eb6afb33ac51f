mod cache;
mod context;
mod version;

pub use cache::{CachedResource, ResourceCache};
pub use context::{ContextState, OverlayRecord, ResourceContext};
pub use version::{InMemoryVersionStore, VersionStore};
