//! clear — Wipe the session log.

use deskshell_types::{ExecResult, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

/// Clear tool. Produces no output; the session drops its visible log.
pub struct Clear;

impl Tool for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("clear", "Clear the terminal screen")
    }

    fn execute(&self, _args: ToolArgs, _ctx: &mut ExecContext) -> ExecResult {
        ExecResult::clear_screen()
    }
}
