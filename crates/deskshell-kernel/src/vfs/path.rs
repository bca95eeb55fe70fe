//! Path values and normalization.
//!
//! Sessions hold their working directory as a [`VfsPath`], never as a node
//! handle, so moving or deleting nodes can't leave a session pointing at
//! something stale. Resolution is purely textual and never touches the tree.

use std::fmt;

/// An ordered sequence of non-empty segments plus an absolute flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VfsPath {
    absolute: bool,
    segments: Vec<String>,
}

impl VfsPath {
    /// The root directory `/`.
    pub fn root() -> Self {
        Self {
            absolute: true,
            segments: Vec::new(),
        }
    }

    /// Split a string into segments without normalizing `.` or `..`.
    ///
    /// Empty segments (`a//b`, trailing `/`) are dropped.
    pub fn parse(input: &str) -> Self {
        Self {
            absolute: input.starts_with('/'),
            segments: input
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build an absolute path from already-normalized segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            absolute: true,
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve `target` against `base`, producing an absolute path.
    ///
    /// Segments are processed left to right on a stack: ordinary segments
    /// are pushed, `..` pops (a no-op at root), `.` and empty segments are
    /// ignored. A leading `~` segment restarts from `home`.
    pub fn resolve(base: &VfsPath, target: &str, home: &VfsPath) -> VfsPath {
        let mut parts = target.split('/').peekable();

        let mut stack: Vec<String> = if target.starts_with('/') {
            Vec::new()
        } else if parts.peek() == Some(&"~") {
            parts.next();
            home.segments.clone()
        } else {
            base.segments.clone()
        };

        for part in parts {
            match part {
                "" | "." => {}
                ".." => {
                    stack.pop();
                }
                name => stack.push(name.to_string()),
            }
        }

        Self {
            absolute: true,
            segments: stack,
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn is_root(&self) -> bool {
        self.absolute && self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The containing directory, or `None` at root.
    pub fn parent(&self) -> Option<VfsPath> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            absolute: self.absolute,
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Last segment, or `None` at root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Append one segment.
    pub fn join(&self, name: impl Into<String>) -> VfsPath {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self {
            absolute: self.absolute,
            segments,
        }
    }

    /// True if `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &VfsPath) -> bool {
        self.absolute == prefix.absolute && self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "/")?;
        }
        write!(f, "{}", self.segments.join("/"))
    }
}
