//! Core tool trait.

use deskshell_types::{ExecResult, ToolArgs, ToolSchema};

use super::context::ExecContext;

/// A builtin command.
///
/// Tools run synchronously: every filesystem call they make is a single
/// atomic engine operation, and the only suspension point in a turn is the
/// gateway, which sits outside the tool system.
pub trait Tool: Send + Sync {
    /// The tool's name (used for lookup).
    fn name(&self) -> &str;

    /// Get the tool's schema.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments and context.
    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult;
}
