//! history — Print the session's command history.

use deskshell_types::{ExecResult, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

/// History tool: numbered list of submitted lines, oldest first.
pub struct History;

impl Tool for History {
    fn name(&self) -> &str {
        "history"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("history", "Show command history")
            .example("Search history", "history | grep cd")
    }

    fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let lines: Vec<String> = ctx
            .history
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>5}  {}", i + 1, line))
            .collect();
        ExecResult::success(lines.join("\n"))
    }
}
