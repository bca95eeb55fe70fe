//! cd — Change working directory.

use deskshell_types::{ExecResult, NodeKind, ParamSchema, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

/// Cd tool: change current working directory.
pub struct Cd;

impl Tool for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cd", "Change current working directory")
            .param(ParamSchema::optional(
                "path",
                "string",
                Some("~"),
                "Directory to change to (use - for previous directory)",
            ))
            .example("Go home", "cd")
            .example("Back to the previous directory", "cd -")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        if args.positional.len() > 1 {
            return ExecResult::failure(1, "cd: too many arguments");
        }
        let path_arg = args.get_positional(0).unwrap_or("~");

        // Handle `cd -` for previous directory
        let resolved = if path_arg == "-" {
            match ctx.get_prev_cwd() {
                Some(prev) => prev.clone(),
                None => return ExecResult::failure(1, "cd: OLDPWD not set"),
            }
        } else {
            ctx.resolve_path(path_arg)
        };

        match ctx.vfs.kind(&resolved) {
            Ok(NodeKind::Directory) => {
                ctx.set_cwd(resolved.clone());
                // For `cd -`, output the new directory (like bash)
                if path_arg == "-" {
                    ExecResult::success(resolved.to_string())
                } else {
                    ExecResult::success("")
                }
            }
            Ok(NodeKind::File) => ExecResult::failure(1, format!("cd: {}: Not a directory", path_arg)),
            Err(e) => ExecResult::failure(1, format!("cd: {}: {}", path_arg, e.unix_message())),
        }
    }
}
