//! rm — Remove files and directories.

use deskshell_types::{ExecResult, NodeKind, ParamSchema, ToolArgs, ToolSchema};

use super::Diagnostics;
use crate::tools::{ExecContext, Tool};

/// Rm tool: remove files or directories.
pub struct Rm;

impl Tool for Rm {
    fn name(&self) -> &str {
        "rm"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rm", "Remove files or directories")
            .param(ParamSchema::flag("recursive", "Remove directories and their contents (-r)").with_aliases(["-r", "-R", "--recursive"]))
            .param(ParamSchema::flag("force", "Ignore nonexistent files (-f)").with_aliases(["-f", "--force"]))
            .param(ParamSchema::required("path", "string", "Path(s) to remove"))
            .example("Remove a folder", "rm -r Downloads/old")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let recursive = args.has_flag("recursive");
        let force = args.has_flag("force");

        if args.positional.is_empty() {
            return if force {
                ExecResult::success("")
            } else {
                ExecResult::failure(1, "rm: missing operand")
            };
        }

        let mut diag = Diagnostics::default();
        for operand in &args.positional {
            if is_dot_operand(operand) {
                diag.push(format!(
                    "rm: refusing to remove '.' or '..' directory: skipping '{}'",
                    operand
                ));
                continue;
            }
            let path = ctx.resolve_path(operand);
            match ctx.vfs.kind(&path) {
                Err(e) if e.is_not_found() && force => {}
                Err(e) => diag.fs("rm: cannot remove", operand, &e),
                Ok(NodeKind::Directory) if !recursive => {
                    diag.push(format!("rm: cannot remove '{}': Is a directory", operand));
                }
                Ok(_) => {
                    if let Err(e) = ctx.vfs.delete(&path) {
                        diag.fs("rm: cannot remove", operand, &e);
                    }
                }
            }
        }
        diag.finish(String::new())
    }
}

/// `.`, `..`, `foo/.`, `../..` and the like.
fn is_dot_operand(operand: &str) -> bool {
    matches!(operand.trim_end_matches('/').rsplit('/').next(), Some("." | ".."))
}
