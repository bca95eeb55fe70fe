//! tail — Output the last part of files.

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use super::head::read_input;
use crate::tools::{ExecContext, Tool};

/// Tail tool: output the last N lines.
pub struct Tail;

impl Tool for Tail {
    fn name(&self) -> &str {
        "tail"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("tail", "Output the last lines of a file or piped input")
            .param(ParamSchema::optional("lines", "int", Some("10"), "Number of lines (-n)").with_aliases(["-n", "--lines"]))
            .param(ParamSchema::optional("path", "string", None, "File to read (piped input if not provided)"))
            .example("Last 3 lines", "tail -n 3 notes.txt")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let input = match read_input("tail", &args, ctx) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let lines: Vec<&str> = input.text.lines().collect();
        let start = lines.len().saturating_sub(input.count);
        ExecResult::success(lines[start..].join("\n"))
    }
}
