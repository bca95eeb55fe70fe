//! The VFS engine: single owner of the filesystem tree.
//!
//! One engine exists per kernel and is shared by every session behind an
//! `Arc`. All access goes through one `RwLock` around the whole tree, and
//! every mutation validates completely before it touches anything, so a
//! failed call leaves the tree exactly as it was.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use deskshell_types::{DirEntry, NodeKind, NodeSnapshot};

use super::error::{VfsError, VfsResult};
use super::node::{Node, NodeBody};
use super::path::VfsPath;

/// Owner and group stamped on nodes the engine creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub group: String,
}

impl Identity {
    pub fn new(user: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            group: group.into(),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new("user", "user")
    }
}

/// In-memory filesystem engine.
#[derive(Debug)]
pub struct VfsEngine {
    root: RwLock<Node>,
    identity: Identity,
    home: VfsPath,
}

impl VfsEngine {
    /// Create an engine over an existing tree. `root` must be a directory.
    pub fn new(root: Node, identity: Identity, home: VfsPath) -> VfsResult<Self> {
        if !root.is_dir() {
            return Err(VfsError::InvalidSnapshot("root is not a directory".into()));
        }
        Ok(Self {
            root: RwLock::new(root),
            identity,
            home,
        })
    }

    /// Create an engine from a serialized tree.
    pub fn from_snapshot(snapshot: &NodeSnapshot, identity: Identity, home: VfsPath) -> VfsResult<Self> {
        Self::new(Node::from_snapshot(snapshot)?, identity, home)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn home(&self) -> &VfsPath {
        &self.home
    }

    fn read(&self) -> VfsResult<RwLockReadGuard<'_, Node>> {
        self.root.read().map_err(|_| VfsError::Poisoned)
    }

    fn write(&self) -> VfsResult<RwLockWriteGuard<'_, Node>> {
        self.root.write().map_err(|_| VfsError::Poisoned)
    }

    /// Normalize `target` relative to `base`. See [`VfsPath::resolve`].
    pub fn resolve_path(&self, base: &VfsPath, target: &str) -> VfsPath {
        VfsPath::resolve(base, target, &self.home)
    }

    /// List a directory's children in insertion order.
    pub fn read_dir(&self, path: &VfsPath) -> VfsResult<Vec<DirEntry>> {
        let root = self.read()?;
        let node = lookup(&root, path)?;
        if !node.is_dir() {
            return Err(VfsError::NotADirectory(path.to_string()));
        }
        Ok(node.children().iter().map(Node::entry).collect())
    }

    /// Read a file's content.
    pub fn read_file(&self, path: &VfsPath) -> VfsResult<String> {
        let root = self.read()?;
        match &lookup(&root, path)?.body {
            NodeBody::File { content } => Ok(content.clone()),
            NodeBody::Directory { .. } => Err(VfsError::IsADirectory(path.to_string())),
        }
    }

    /// Metadata for one node. The root reports its name as `/`.
    pub fn stat(&self, path: &VfsPath) -> VfsResult<DirEntry> {
        let root = self.read()?;
        let mut entry = lookup(&root, path)?.entry();
        if path.is_root() {
            entry.name = "/".to_string();
        }
        Ok(entry)
    }

    pub fn exists(&self, path: &VfsPath) -> bool {
        self.read()
            .map(|root| root.descend(path.segments()).is_some())
            .unwrap_or(false)
    }

    /// Create or overwrite a file. Never creates parent directories.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path, len = content.len()), err)]
    pub fn write_file(&self, path: &VfsPath, content: &str) -> VfsResult<()> {
        let mut root = self.write()?;
        let (parent, name) = parent_dir_mut(&mut root, path)?;
        match parent.child_mut(name) {
            Some(node) => match &mut node.body {
                NodeBody::File { content: existing } => {
                    *existing = content.to_string();
                }
                NodeBody::Directory { .. } => return Err(VfsError::IsADirectory(path.to_string())),
            },
            None => {
                parent.upsert_child(Node::file(name, content, &self.identity.user, &self.identity.group));
            }
        }
        Ok(())
    }

    /// Append to a file, creating it if absent.
    ///
    /// Appending to non-empty content inserts a newline separator first.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path, len = content.len()), err)]
    pub fn append_file(&self, path: &VfsPath, content: &str) -> VfsResult<()> {
        let mut root = self.write()?;
        let (parent, name) = parent_dir_mut(&mut root, path)?;
        match parent.child_mut(name) {
            Some(node) => match &mut node.body {
                NodeBody::File { content: existing } => {
                    if !existing.is_empty() {
                        existing.push('\n');
                    }
                    existing.push_str(content);
                }
                NodeBody::Directory { .. } => return Err(VfsError::IsADirectory(path.to_string())),
            },
            None => {
                parent.upsert_child(Node::file(name, content, &self.identity.user, &self.identity.group));
            }
        }
        Ok(())
    }

    /// Create one directory. The parent must already exist.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path), err)]
    pub fn make_dir(&self, path: &VfsPath) -> VfsResult<()> {
        if path.is_root() {
            return Err(VfsError::AlreadyExists(path.to_string()));
        }
        let mut root = self.write()?;
        let (parent, name) = parent_dir_mut(&mut root, path)?;
        if parent.child(name).is_some() {
            return Err(VfsError::AlreadyExists(path.to_string()));
        }
        parent.upsert_child(Node::directory(name, &self.identity.user, &self.identity.group));
        Ok(())
    }

    /// Remove a node and everything under it. The root can't be removed.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path), err)]
    pub fn delete(&self, path: &VfsPath) -> VfsResult<()> {
        if path.is_root() {
            return Err(VfsError::PermissionDenied(path.to_string()));
        }
        let mut root = self.write()?;
        let (parent, name) = parent_dir_mut(&mut root, path)?;
        parent
            .take_child(name)
            .map(|_| ())
            .ok_or_else(|| VfsError::NotFound(path.to_string()))
    }

    /// Deep-copy the subtree at `src` to `dest`, replacing whatever is there.
    #[tracing::instrument(level = "debug", skip_all, fields(src = %src, dest = %dest), err)]
    pub fn copy(&self, src: &VfsPath, dest: &VfsPath) -> VfsResult<()> {
        if dest.is_root() || dest.starts_with(src) {
            return Err(VfsError::InvalidPath(dest.to_string()));
        }
        let mut root = self.write()?;
        let mut copy = lookup(&root, src)?.clone();
        let (parent, name) = parent_dir_mut(&mut root, dest)?;
        copy.name = name.to_string();
        copy.created_at = Utc::now();
        parent.upsert_child(copy);
        Ok(())
    }

    /// Relocate the subtree at `src` to `dest`, replacing whatever is there.
    ///
    /// The node keeps its metadata and children; only its name changes.
    /// Fails when `src` is root or when `dest` lies inside `src`.
    #[tracing::instrument(level = "debug", skip_all, fields(src = %src, dest = %dest), err)]
    pub fn move_item(&self, src: &VfsPath, dest: &VfsPath) -> VfsResult<()> {
        if src.is_root() || dest.is_root() || dest.starts_with(src) {
            return Err(VfsError::InvalidPath(dest.to_string()));
        }
        let mut root = self.write()?;

        // Validate both ends before detaching anything.
        lookup(&root, src)?;
        parent_dir_mut(&mut root, dest)?;

        let (src_parent, src_name) = parent_dir_mut(&mut root, src)?;
        let mut node = src_parent
            .take_child(src_name)
            .ok_or_else(|| VfsError::NotFound(src.to_string()))?;

        let (dest_parent, dest_name) = parent_dir_mut(&mut root, dest)?;
        node.name = dest_name.to_string();
        dest_parent.upsert_child(node);
        Ok(())
    }

    /// Rewrite a node's permissions from a symbolic or octal mode.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path), err)]
    pub fn chmod(&self, path: &VfsPath, mode: &str) -> VfsResult<()> {
        let mut root = self.write()?;
        let node = root
            .descend_mut(path.segments())
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        node.permissions = node.permissions.apply_mode(mode)?;
        Ok(())
    }

    /// Whole tree with file contents omitted.
    pub fn snapshot(&self) -> VfsResult<NodeSnapshot> {
        Ok(self.read()?.to_snapshot(false))
    }

    /// Whole tree including file contents.
    pub fn export(&self) -> VfsResult<NodeSnapshot> {
        Ok(self.read()?.to_snapshot(true))
    }

    /// Kind of node at `path`, if any.
    pub fn kind(&self, path: &VfsPath) -> VfsResult<NodeKind> {
        Ok(lookup(&*self.read()?, path)?.kind())
    }
}

fn lookup<'a>(root: &'a Node, path: &VfsPath) -> VfsResult<&'a Node> {
    root.descend(path.segments())
        .ok_or_else(|| VfsError::NotFound(path.to_string()))
}

/// The directory that contains `path`, plus the final segment.
///
/// Fails if `path` is root, if the parent is missing, or if it is a file.
fn parent_dir_mut<'a, 'p>(root: &'a mut Node, path: &'p VfsPath) -> VfsResult<(&'a mut Node, &'p str)> {
    let (Some(parent_path), Some(name)) = (path.parent(), path.file_name()) else {
        return Err(VfsError::InvalidPath(path.to_string()));
    };
    let parent = root
        .descend_mut(parent_path.segments())
        .ok_or_else(|| VfsError::NotFound(parent_path.to_string()))?;
    if !parent.is_dir() {
        return Err(VfsError::NotADirectory(parent_path.to_string()));
    }
    Ok((parent, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> VfsEngine {
        let root = Node::directory("", "root", "root")
            .with_child(Node::directory("home", "root", "root").with_child(
                Node::directory("user", "user", "user")
                    .with_child(Node::file(".hidden", "", "user", "user"))
                    .with_child(Node::file("notes.txt", "one\ntwo", "user", "user")),
            ))
            .with_child(Node::directory("tmp", "root", "root"));
        VfsEngine::new(root, Identity::default(), VfsPath::parse("/home/user")).unwrap()
    }

    fn p(s: &str) -> VfsPath {
        VfsPath::parse(s)
    }

    #[test]
    fn test_write_then_read() {
        let vfs = engine();
        vfs.write_file(&p("/tmp/x.txt"), "X").unwrap();
        assert_eq!(vfs.read_file(&p("/tmp/x.txt")).unwrap(), "X");
    }

    #[test]
    fn test_write_never_creates_parents() {
        let vfs = engine();
        let err = vfs.write_file(&p("/tmp/missing/x.txt"), "X").unwrap_err();
        assert!(matches!(err, VfsError::NotFound(_)));
        assert!(!vfs.exists(&p("/tmp/missing")));
    }

    #[test]
    fn test_write_rejects_directory_and_file_parent() {
        let vfs = engine();
        assert!(matches!(vfs.write_file(&p("/tmp"), "X"), Err(VfsError::IsADirectory(_))));
        assert!(matches!(
            vfs.write_file(&p("/home/user/notes.txt/x"), "X"),
            Err(VfsError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_overwrite_keeps_metadata() {
        let vfs = engine();
        vfs.chmod(&p("/home/user/notes.txt"), "600").unwrap();
        vfs.write_file(&p("/home/user/notes.txt"), "new").unwrap();
        let entry = vfs.stat(&p("/home/user/notes.txt")).unwrap();
        assert_eq!(entry.permissions, "-rw-------");
        assert_eq!(entry.size, 3);
    }

    #[test]
    fn test_append_inserts_separator() {
        let vfs = engine();
        vfs.append_file(&p("/tmp/log"), "hello").unwrap();
        vfs.append_file(&p("/tmp/log"), "world").unwrap();
        assert_eq!(vfs.read_file(&p("/tmp/log")).unwrap(), "hello\nworld");

        vfs.write_file(&p("/tmp/empty"), "").unwrap();
        vfs.append_file(&p("/tmp/empty"), "first").unwrap();
        assert_eq!(vfs.read_file(&p("/tmp/empty")).unwrap(), "first");
    }

    #[test]
    fn test_read_errors() {
        let vfs = engine();
        assert!(matches!(vfs.read_file(&p("/tmp")), Err(VfsError::IsADirectory(_))));
        assert!(matches!(vfs.read_file(&p("/nope")), Err(VfsError::NotFound(_))));
        assert!(matches!(vfs.read_dir(&p("/home/user/notes.txt")), Err(VfsError::NotADirectory(_))));
    }

    #[test]
    fn test_read_dir_insertion_order() {
        let vfs = engine();
        vfs.write_file(&p("/tmp/b"), "").unwrap();
        vfs.write_file(&p("/tmp/a"), "").unwrap();
        let names: Vec<_> = vfs.read_dir(&p("/tmp")).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_make_dir() {
        let vfs = engine();
        vfs.make_dir(&p("/tmp/d")).unwrap();
        assert!(matches!(vfs.make_dir(&p("/tmp/d")), Err(VfsError::AlreadyExists(_))));
        assert!(matches!(vfs.make_dir(&p("/tmp/x/y")), Err(VfsError::NotFound(_))));
        assert!(matches!(vfs.make_dir(&p("/")), Err(VfsError::AlreadyExists(_))));
        let entry = vfs.stat(&p("/tmp/d")).unwrap();
        assert_eq!(entry.permissions, "drwxr-xr-x");
        assert_eq!(entry.owner, "user");
    }

    #[test]
    fn test_delete_removes_descendants() {
        let vfs = engine();
        vfs.delete(&p("/home")).unwrap();
        assert!(!vfs.exists(&p("/home/user/notes.txt")));
        assert!(!vfs.exists(&p("/home")));
        assert!(matches!(vfs.delete(&p("/")), Err(VfsError::PermissionDenied(_))));
        assert!(matches!(vfs.delete(&p("/home")), Err(VfsError::NotFound(_))));
    }

    #[test]
    fn test_copy_is_deep_and_overwrites() {
        let vfs = engine();
        vfs.write_file(&p("/tmp/user"), "in the way").unwrap();
        vfs.copy(&p("/home/user"), &p("/tmp/user")).unwrap();
        assert_eq!(vfs.read_file(&p("/tmp/user/notes.txt")).unwrap(), "one\ntwo");

        vfs.write_file(&p("/tmp/user/notes.txt"), "changed").unwrap();
        assert_eq!(vfs.read_file(&p("/home/user/notes.txt")).unwrap(), "one\ntwo");
    }

    #[test]
    fn test_copy_into_itself_fails() {
        let vfs = engine();
        assert!(matches!(
            vfs.copy(&p("/home"), &p("/home/user/again")),
            Err(VfsError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_move_preserves_node() {
        let vfs = engine();
        vfs.chmod(&p("/home/user/notes.txt"), "700").unwrap();
        let before = vfs.stat(&p("/home/user/notes.txt")).unwrap();
        vfs.move_item(&p("/home/user/notes.txt"), &p("/tmp/moved.txt")).unwrap();

        assert!(!vfs.exists(&p("/home/user/notes.txt")));
        let after = vfs.stat(&p("/tmp/moved.txt")).unwrap();
        assert_eq!(after.name, "moved.txt");
        assert_eq!(after.permissions, before.permissions);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_move_failures_leave_tree_intact() {
        let vfs = engine();
        let before = vfs.export().unwrap();
        assert!(matches!(vfs.move_item(&p("/home"), &p("/home/user/x")), Err(VfsError::InvalidPath(_))));
        assert!(matches!(vfs.move_item(&p("/"), &p("/tmp/root")), Err(VfsError::InvalidPath(_))));
        assert!(matches!(vfs.move_item(&p("/home/user"), &p("/nope/x")), Err(VfsError::NotFound(_))));
        assert!(matches!(vfs.move_item(&p("/nope"), &p("/tmp/x")), Err(VfsError::NotFound(_))));
        assert_eq!(vfs.export().unwrap(), before);
    }

    #[test]
    fn test_chmod_errors() {
        let vfs = engine();
        assert!(matches!(vfs.chmod(&p("/nope"), "755"), Err(VfsError::NotFound(_))));
        assert!(matches!(vfs.chmod(&p("/tmp"), "rwx"), Err(VfsError::InvalidMode(_))));
        assert_eq!(vfs.stat(&p("/tmp")).unwrap().permissions, "drwxr-xr-x");
    }

    #[test]
    fn test_snapshot_omits_contents() {
        let vfs = engine();
        let json = serde_json::to_string(&vfs.snapshot().unwrap()).unwrap();
        assert!(json.contains("notes.txt"));
        assert!(!json.contains("one\\ntwo"));

        let exported = vfs.export().unwrap();
        let rebuilt = VfsEngine::from_snapshot(&exported, Identity::default(), p("/home/user")).unwrap();
        assert_eq!(rebuilt.read_file(&p("/home/user/notes.txt")).unwrap(), "one\ntwo");
    }

    #[test]
    fn test_engine_rejects_file_root() {
        let root = Node::file("", "", "root", "root");
        assert!(VfsEngine::new(root, Identity::default(), VfsPath::root()).is_err());
    }

    #[test]
    fn test_stat_root() {
        let vfs = engine();
        let entry = vfs.stat(&VfsPath::root()).unwrap();
        assert_eq!(entry.name, "/");
        assert!(entry.is_dir());
    }
}
