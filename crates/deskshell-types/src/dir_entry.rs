//! Directory entry types returned by VFS listings and `stat`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Size reported for directories, as a real `ls -l` would.
pub const DIRECTORY_SIZE: u64 = 4096;

/// Kind of filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// A directory entry — name plus the metadata `ls -l` shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    /// Kind of entry.
    pub kind: NodeKind,
    /// Content length for files, [`DIRECTORY_SIZE`] for directories.
    pub size: u64,
    /// Ten-character symbolic permissions, e.g. `drwxr-xr-x`.
    pub permissions: String,
    /// Owning user.
    pub owner: String,
    /// Owning group.
    pub group: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl DirEntry {
    /// Returns true if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Returns true if this entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Returns true for dotfiles, which `ls` hides without `-a`.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}
