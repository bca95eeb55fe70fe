//! help — Display help for topics and tools.

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use crate::help::{HelpTopic, get_help};
use crate::tools::{ExecContext, Tool};

/// Help tool: display help for topics and tools.
pub struct Help;

impl Tool for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("help", "Display help for commands and shell syntax")
            .param(ParamSchema::optional(
                "topic",
                "string",
                None,
                "syntax, builtins, or a command name",
            ))
            .example("Usage of one command", "help grep")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let raw = args.get_positional(0).unwrap_or_default();
        match get_help(&HelpTopic::parse_topic(raw), &ctx.tool_schemas) {
            Some(text) => ExecResult::success(text),
            None => ExecResult::failure(1, format!("help: no help topics match '{}'", raw)),
        }
    }
}
