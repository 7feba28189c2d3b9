//! Configuration and dependency wiring.

mod dependencies;
mod settings;

pub use dependencies::{build_factory, ContentSources, Dependencies};
pub use settings::{ConnectionMode, IndexerConfig};
