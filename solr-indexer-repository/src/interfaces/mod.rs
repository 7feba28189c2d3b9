//! Interface definitions for the engine and the content store.
//!
//! `SearchEngineClient` abstracts the search backend, `ContentSource` the
//! read-only content repositories. Both are injected into indexers so they can
//! be swapped for mocks in tests.

mod content_source;
mod search_engine_client;

pub use content_source::ContentSource;
pub use search_engine_client::SearchEngineClient;
