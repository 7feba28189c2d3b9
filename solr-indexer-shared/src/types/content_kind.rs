//! Content kinds known to the indexer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DescriptorError;

/// A kind of persisted content item.
///
/// Leaf kinds (`NodeSource`, `Document`) map directly to search documents.
/// Cascading kinds (`Node`, `Tag`, `Folder`) have no document of their own and
/// only trigger recomputation of the leaf documents that depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    NodeSource,
    Node,
    Tag,
    Folder,
    Document,
}

impl ContentKind {
    /// Every content kind, leaf kinds first.
    pub const ALL: [ContentKind; 5] = [
        ContentKind::NodeSource,
        ContentKind::Document,
        ContentKind::Node,
        ContentKind::Tag,
        ContentKind::Folder,
    ];

    /// Returns true if items of this kind are stored as search documents.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ContentKind::NodeSource | ContentKind::Document)
    }

    /// The class name carried by messages and stored in `document_type_s`.
    pub fn class_name(&self) -> &'static str {
        match self {
            ContentKind::NodeSource => "NodesSources",
            ContentKind::Node => "Node",
            ContentKind::Tag => "Tag",
            ContentKind::Folder => "Folder",
            ContentKind::Document => "Document",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for ContentKind {
    type Err = DescriptorError;

    /// Parse a class name. Namespaced names (`App\Entity\Tag`, `app::Tag`) are
    /// matched on their last segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s
            .rsplit(['\\', ':', '.'])
            .next()
            .unwrap_or(s)
            .trim();

        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.class_name() == name)
            .ok_or_else(|| DescriptorError::UnknownKind(s.to_string()))
    }
}
