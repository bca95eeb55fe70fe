//! Pure data types for deskshell — tool schemas, exec results, snapshots.
//!
//! This crate is a leaf dependency with no async runtime, no parser, no I/O.
//! It exists so that desktop front ends (window manager, taskbar, terminal
//! widgets) can exchange data with the kernel without pulling in its deps.

pub mod dir_entry;
pub mod result;
pub mod snapshot;
pub mod tool;
pub mod window;

// Flat re-exports for convenience
pub use dir_entry::*;
pub use result::*;
pub use snapshot::*;
pub use tool::*;
pub use window::*;
