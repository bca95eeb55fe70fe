//! mv — Move or rename files and directories.

use deskshell_types::{ExecResult, NodeKind, ParamSchema, ToolArgs, ToolSchema};

use super::Diagnostics;
use super::cp::{split_operands, target_path};
use crate::tools::{ExecContext, Tool};
use crate::vfs::VfsError;

/// Mv tool: move or rename.
pub struct Mv;

impl Tool for Mv {
    fn name(&self) -> &str {
        "mv"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("mv", "Move or rename files and directories")
            .param(ParamSchema::required("source", "string", "Source path(s)"))
            .param(ParamSchema::required("destination", "string", "Destination path or directory"))
            .example("Rename", "mv draft.txt final.txt")
            .example("Move into a folder", "mv final.txt Documents")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let (sources, dest_arg) = match split_operands("mv", &args.positional) {
            Ok(split) => split,
            Err(result) => return result,
        };

        let dest = ctx.resolve_path(dest_arg);
        let dest_is_dir = matches!(ctx.vfs.kind(&dest), Ok(NodeKind::Directory));
        if sources.len() > 1 && !dest_is_dir {
            return ExecResult::failure(1, format!("mv: target '{}' is not a directory", dest_arg));
        }

        let mut diag = Diagnostics::default();
        for operand in sources {
            let src = ctx.resolve_path(operand);
            if let Err(e) = ctx.vfs.kind(&src) {
                diag.fs("mv: cannot stat", operand, &e);
                continue;
            }

            let target = target_path(&src, &dest, dest_is_dir);
            if target == src {
                diag.push(format!("mv: '{}' and '{}' are the same file", operand, dest_arg));
                continue;
            }
            match ctx.vfs.move_item(&src, &target) {
                Ok(()) => {}
                Err(VfsError::InvalidPath(_)) => diag.push(format!(
                    "mv: cannot move '{}' to a subdirectory of itself, '{}'",
                    operand, dest_arg
                )),
                Err(e) => diag.push(format!(
                    "mv: cannot move '{}' to '{}': {}",
                    operand,
                    dest_arg,
                    e.unix_message()
                )),
            }
        }
        diag.finish(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{make_ctx, read, write};

    fn mv(ctx: &mut ExecContext, operands: &[&str]) -> ExecResult {
        Mv.execute(ToolArgs::positional(operands.iter().copied()), ctx)
    }

    #[test]
    fn test_mv_rename() {
        let mut ctx = make_ctx();
        write(&ctx, "a", "data");
        assert!(mv(&mut ctx, &["a", "b"]).ok());
        assert_eq!(read(&ctx, "b").as_deref(), Some("data"));
        assert!(read(&ctx, "a").is_none());
    }

    #[test]
    fn test_mv_into_directory() {
        let mut ctx = make_ctx();
        write(&ctx, "a", "data");
        assert!(mv(&mut ctx, &["a", "Documents"]).ok());
        assert_eq!(read(&ctx, "Documents/a").as_deref(), Some("data"));
    }

    #[test]
    fn test_mv_directory_keeps_children() {
        let mut ctx = make_ctx();
        assert!(mv(&mut ctx, &["Documents", "/tmp/docs"]).ok());
        assert!(read(&ctx, "/tmp/docs/readme.txt").is_some());
    }

    #[test]
    fn test_mv_into_own_subdirectory() {
        let mut ctx = make_ctx();
        let result = mv(&mut ctx, &["Documents", "Documents/sub"]);
        assert_eq!(
            result.err,
            "mv: cannot move 'Documents' to a subdirectory of itself, 'Documents/sub'"
        );
        assert!(read(&ctx, "Documents/readme.txt").is_some());
    }

    #[test]
    fn test_mv_onto_itself_is_same_file() {
        let mut ctx = make_ctx();
        write(&ctx, "a", "data");
        let result = mv(&mut ctx, &["a", "."]);
        assert_eq!(result.err, "mv: 'a' and '.' are the same file");
        assert_eq!(read(&ctx, "a").as_deref(), Some("data"));
    }

    #[test]
    fn test_mv_missing_source() {
        let mut ctx = make_ctx();
        let result = mv(&mut ctx, &["nope", "x"]);
        assert_eq!(result.err, "mv: cannot stat 'nope': No such file or directory");
    }
}
