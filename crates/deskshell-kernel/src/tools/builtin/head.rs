//! head — Output the first part of files.

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use super::{legacy_count_and_path, parse_count};
use crate::tools::{ExecContext, Tool};

pub(crate) const DEFAULT_LINES: usize = 10;

/// Head tool: output the first N lines.
pub struct Head;

impl Tool for Head {
    fn name(&self) -> &str {
        "head"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("head", "Output the first lines of a file or piped input")
            .param(ParamSchema::optional("lines", "int", Some("10"), "Number of lines (-n)").with_aliases(["-n", "--lines"]))
            .param(ParamSchema::optional("path", "string", None, "File to read (piped input if not provided)"))
            .example("First 3 lines", "head -n 3 notes.txt")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let input = match read_input("head", &args, ctx) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let lines: Vec<&str> = input.text.lines().take(input.count).collect();
        ExecResult::success(lines.join("\n"))
    }
}

/// Line count and text for `head`/`tail`.
pub(crate) struct LineInput {
    pub count: usize,
    pub text: String,
}

/// Shared option handling: `-n N`, legacy `-N`, then file or piped input.
pub(crate) fn read_input(tool: &str, args: &ToolArgs, ctx: &mut ExecContext) -> Result<LineInput, ExecResult> {
    let (legacy, path) = legacy_count_and_path(&args.positional);
    let count = match args.get_named("lines").or(legacy) {
        Some(raw) => parse_count(tool, raw)?,
        None => DEFAULT_LINES,
    };

    let text = match path {
        Some(path) => ctx.vfs.read_file(&ctx.resolve_path(path)).map_err(|e| {
            ExecResult::failure(1, format!("{}: cannot open '{}' for reading: {}", tool, path, e.unix_message()))
        })?,
        None => ctx.take_stdin().unwrap_or_default(),
    };

    Ok(LineInput { count, text })
}
