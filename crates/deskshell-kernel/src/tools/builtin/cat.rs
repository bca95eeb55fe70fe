//! cat — Read and output file contents.

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use super::Diagnostics;
use crate::tools::{ExecContext, Tool};

/// Cat tool: read and output file contents.
pub struct Cat;

impl Tool for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cat", "Read and output file contents")
            .param(ParamSchema::optional("path", "string", None, "File path(s) to read; piped input if none"))
            .example("Show a file", "cat Documents/readme.txt")
            .example("Pass piped input through", "echo hi | cat")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        // If no files specified, echo piped input (like POSIX cat)
        if args.positional.is_empty() {
            return ExecResult::success(ctx.take_stdin().unwrap_or_default());
        }

        let mut parts = Vec::with_capacity(args.positional.len());
        let mut diag = Diagnostics::default();
        for path in &args.positional {
            match ctx.vfs.read_file(&ctx.resolve_path(path)) {
                Ok(content) => parts.push(content),
                Err(e) => diag.push(format!("cat: {}: {}", path, e.unix_message())),
            }
        }
        diag.finish(parts.join("\n"))
    }
}
