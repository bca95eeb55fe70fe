//! Serializable form of the filesystem tree.
//!
//! The tree is a document of nested records:
//!
//! ```text
//! { name, kind, permissions, owner, group, createdAt, content | children }
//! ```
//!
//! The same shape is used to seed a kernel from JSON, to export the tree,
//! and (with contents stripped) as context for the fallback gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dir_entry::NodeKind;

/// One node of a serialized filesystem tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub name: String,
    pub kind: NodeKind,
    pub permissions: String,
    pub owner: String,
    pub group: String,
    pub created_at: DateTime<Utc>,
    /// File content. Absent for directories and in content-free snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Child nodes, in insertion order. Absent for files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSnapshot>>,
}

impl NodeSnapshot {
    /// A copy of this subtree with every file content removed.
    pub fn without_contents(&self) -> Self {
        Self {
            content: None,
            children: self
                .children
                .as_ref()
                .map(|children| children.iter().map(Self::without_contents).collect()),
            ..self.clone()
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(Self::node_count)
            .sum::<usize>()
    }
}
