//! The in-memory filesystem tree.

use chrono::{DateTime, Utc};
use deskshell_types::{DIRECTORY_SIZE, DirEntry, NodeKind, NodeSnapshot};

use super::error::{VfsError, VfsResult};
use super::permissions::Permissions;

/// File content or directory children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    File { content: String },
    /// Children in insertion order. Names are unique among siblings.
    Directory { children: Vec<Node> },
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub permissions: Permissions,
    pub owner: String,
    pub group: String,
    pub created_at: DateTime<Utc>,
    pub body: NodeBody,
}

impl Node {
    pub fn file(name: impl Into<String>, content: impl Into<String>, owner: &str, group: &str) -> Self {
        Self {
            name: name.into(),
            permissions: Permissions::default_for(NodeKind::File),
            owner: owner.to_string(),
            group: group.to_string(),
            created_at: Utc::now(),
            body: NodeBody::File {
                content: content.into(),
            },
        }
    }

    pub fn directory(name: impl Into<String>, owner: &str, group: &str) -> Self {
        Self {
            name: name.into(),
            permissions: Permissions::default_for(NodeKind::Directory),
            owner: owner.to_string(),
            group: group.to_string(),
            created_at: Utc::now(),
            body: NodeBody::Directory {
                children: Vec::new(),
            },
        }
    }

    /// Builder-style: add a child to a directory. Ignored on files.
    pub fn with_child(mut self, child: Node) -> Self {
        if let NodeBody::Directory { children } = &mut self.body {
            children.push(child);
        }
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::File { .. } => NodeKind::File,
            NodeBody::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == NodeKind::Directory
    }

    /// Content length for files, the fixed directory size otherwise.
    pub fn size(&self) -> u64 {
        match &self.body {
            NodeBody::File { content } => content.len() as u64,
            NodeBody::Directory { .. } => DIRECTORY_SIZE,
        }
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        match &self.body {
            NodeBody::Directory { children } => children.iter().find(|c| c.name == name),
            NodeBody::File { .. } => None,
        }
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        match &mut self.body {
            NodeBody::Directory { children } => children.iter_mut().find(|c| c.name == name),
            NodeBody::File { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match &self.body {
            NodeBody::Directory { children } => children,
            NodeBody::File { .. } => &[],
        }
    }

    /// Walk down `segments` from this node.
    pub fn descend(&self, segments: &[String]) -> Option<&Node> {
        segments.iter().try_fold(self, |node, name| node.child(name))
    }

    pub fn descend_mut(&mut self, segments: &[String]) -> Option<&mut Node> {
        segments.iter().try_fold(self, |node, name| node.child_mut(name))
    }

    /// Insert `child`, replacing any sibling with the same name in place.
    ///
    /// Replacement keeps the sibling's position so listings stay stable.
    pub fn upsert_child(&mut self, child: Node) -> bool {
        let NodeBody::Directory { children } = &mut self.body else {
            return false;
        };
        match children.iter_mut().find(|c| c.name == child.name) {
            Some(slot) => *slot = child,
            None => children.push(child),
        }
        true
    }

    /// Remove and return the child called `name`.
    pub fn take_child(&mut self, name: &str) -> Option<Node> {
        let NodeBody::Directory { children } = &mut self.body else {
            return None;
        };
        let index = children.iter().position(|c| c.name == name)?;
        Some(children.remove(index))
    }

    /// Listing entry for this node.
    pub fn entry(&self) -> DirEntry {
        DirEntry {
            name: self.name.clone(),
            kind: self.kind(),
            size: self.size(),
            permissions: self.permissions.to_string(),
            owner: self.owner.clone(),
            group: self.group.clone(),
            created_at: self.created_at,
        }
    }

    /// Serialize this subtree, with or without file contents.
    pub fn to_snapshot(&self, with_contents: bool) -> NodeSnapshot {
        let (content, children) = match &self.body {
            NodeBody::File { content } => (with_contents.then(|| content.clone()), None),
            NodeBody::Directory { children } => (
                None,
                Some(children.iter().map(|c| c.to_snapshot(with_contents)).collect()),
            ),
        };
        NodeSnapshot {
            name: self.name.clone(),
            kind: self.kind(),
            permissions: self.permissions.to_string(),
            owner: self.owner.clone(),
            group: self.group.clone(),
            created_at: self.created_at,
            content,
            children,
        }
    }

    /// Rebuild a subtree from its serialized form, validating every node.
    ///
    /// Rejects permission strings that don't match the node kind, files with
    /// children, names containing `/`, and duplicate sibling names.
    pub fn from_snapshot(snapshot: &NodeSnapshot) -> VfsResult<Self> {
        let invalid = |why: &str| VfsError::InvalidSnapshot(format!("{}: {}", snapshot.name, why));

        let permissions = Permissions::parse(&snapshot.permissions)
            .map_err(|_| invalid("bad permission string"))?;
        if permissions.kind() != snapshot.kind {
            return Err(invalid("permission type does not match kind"));
        }
        if snapshot.name.contains('/') {
            return Err(invalid("name contains '/'"));
        }

        let body = match snapshot.kind {
            NodeKind::File => {
                if snapshot.children.is_some() {
                    return Err(invalid("file has children"));
                }
                NodeBody::File {
                    content: snapshot.content.clone().unwrap_or_default(),
                }
            }
            NodeKind::Directory => {
                let mut children: Vec<Node> = Vec::new();
                for child in snapshot.children.iter().flatten() {
                    if child.name.is_empty() || children.iter().any(|c| c.name == child.name) {
                        return Err(invalid("empty or duplicate child name"));
                    }
                    children.push(Node::from_snapshot(child)?);
                }
                NodeBody::Directory { children }
            }
        };

        Ok(Self {
            name: snapshot.name.clone(),
            permissions,
            owner: snapshot.owner.clone(),
            group: snapshot.group.clone(),
            created_at: snapshot.created_at,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        Node::directory("", "root", "root").with_child(
            Node::directory("home", "root", "root")
                .with_child(Node::file("a.txt", "alpha", "user", "user"))
                .with_child(Node::file("b.txt", "beta", "user", "user")),
        )
    }

    #[test]
    fn test_descend() {
        let root = tree();
        let found = root.descend(&["home".to_string(), "a.txt".to_string()]);
        assert_eq!(found.map(|n| n.size()), Some(5));
        assert!(root.descend(&["home".to_string(), "nope".to_string()]).is_none());
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut root = tree();
        let home = root.child_mut("home").unwrap();
        home.upsert_child(Node::file("a.txt", "replaced", "user", "user"));
        let names: Vec<_> = home.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
        assert_eq!(home.child("a.txt").unwrap().size(), 8);
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_tree() {
        let root = tree();
        let rebuilt = Node::from_snapshot(&root.to_snapshot(true)).unwrap();
        assert_eq!(rebuilt, root);
    }

    #[test]
    fn test_from_snapshot_rejects_duplicates() {
        let mut snap = tree().to_snapshot(true);
        let home = &mut snap.children.as_mut().unwrap()[0];
        let dup = home.children.as_ref().unwrap()[0].clone();
        home.children.as_mut().unwrap().push(dup);
        assert!(matches!(Node::from_snapshot(&snap), Err(VfsError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_from_snapshot_rejects_kind_mismatch() {
        let mut snap = Node::file("x", "", "u", "u").to_snapshot(true);
        snap.permissions = "drwxr-xr-x".into();
        assert!(Node::from_snapshot(&snap).is_err());
    }
}
