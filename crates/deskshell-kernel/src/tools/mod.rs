//! Tool system for deskshell.
//!
//! Every command the shell runs locally is a tool: a named handler taking
//! parsed arguments plus an [`ExecContext`] and returning an `ExecResult`.
//!
//! # Architecture
//!
//! ```text
//! ToolRegistry
//! └── Builtins (ls, cd, cat, echo, grep, ...)
//! ```
//!
//! A name missing from the registry is not an error here; the pipeline
//! runner turns it into a delegation to the fallback gateway.

mod builtin;
mod context;
pub mod markup;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::{ExecContext, SystemInfo};
pub use registry::ToolRegistry;
pub use traits::Tool;

pub use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

#[cfg(test)]
pub(crate) use context::test_support;
