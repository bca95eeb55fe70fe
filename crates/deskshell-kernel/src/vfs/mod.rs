//! Virtual Filesystem (VFS) for deskshell.
//!
//! A single in-memory document tree owned by [`VfsEngine`]:
//!
//! ```text
//! /
//! ├── home/user/{Desktop,Documents,Downloads}
//! ├── etc/hostname
//! ├── tmp/
//! └── bin/
//! ```
//!
//! Sessions address the tree only through [`VfsPath`] values. Permissions
//! are cosmetic strings; nothing is enforced.

mod engine;
mod error;
mod node;
mod path;
mod permissions;
mod seed;

pub use engine::{Identity, VfsEngine};
pub use error::{VfsError, VfsResult};
pub use node::{Node, NodeBody};
pub use path::VfsPath;
pub use permissions::Permissions;
pub use seed::default_tree;
