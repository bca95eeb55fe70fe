//! cp — Copy files and directories.

use deskshell_types::{ExecResult, NodeKind, ParamSchema, ToolArgs, ToolSchema};

use super::Diagnostics;
use crate::tools::{ExecContext, Tool};
use crate::vfs::{VfsError, VfsPath};

/// Cp tool: copy files or directories.
pub struct Cp;

impl Tool for Cp {
    fn name(&self) -> &str {
        "cp"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cp", "Copy files or directories")
            .param(ParamSchema::flag("recursive", "Copy directories recursively (-r)").with_aliases(["-r", "-R", "--recursive"]))
            .param(ParamSchema::required("source", "string", "Source path(s)"))
            .param(ParamSchema::required("destination", "string", "Destination path or directory"))
            .example("Back up a file", "cp notes.txt notes.bak")
            .example("Copy a folder into another", "cp -r Documents Desktop")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let recursive = args.has_flag("recursive");
        let (sources, dest_arg) = match split_operands("cp", &args.positional) {
            Ok(split) => split,
            Err(result) => return result,
        };

        let dest = ctx.resolve_path(dest_arg);
        let dest_is_dir = matches!(ctx.vfs.kind(&dest), Ok(NodeKind::Directory));
        if sources.len() > 1 && !dest_is_dir {
            return ExecResult::failure(1, format!("cp: target '{}' is not a directory", dest_arg));
        }

        let mut diag = Diagnostics::default();
        for operand in sources {
            let src = ctx.resolve_path(operand);
            match ctx.vfs.kind(&src) {
                Err(e) => {
                    diag.fs("cp: cannot stat", operand, &e);
                    continue;
                }
                Ok(NodeKind::Directory) if !recursive => {
                    diag.push(format!("cp: -r not specified; omitting directory '{}'", operand));
                    continue;
                }
                Ok(_) => {}
            }

            let target = target_path(&src, &dest, dest_is_dir);
            if target == src {
                diag.push(format!("cp: '{}' and '{}' are the same file", operand, dest_arg));
                continue;
            }
            match ctx.vfs.copy(&src, &target) {
                Ok(()) => {}
                Err(VfsError::InvalidPath(_)) => diag.push(format!(
                    "cp: cannot copy a directory, '{}', into itself, '{}'",
                    operand, dest_arg
                )),
                Err(e) => diag.push(format!(
                    "cp: cannot create regular file '{}': {}",
                    dest_arg,
                    e.unix_message()
                )),
            }
        }
        diag.finish(String::new())
    }
}

/// Split `SOURCE... DEST`, reporting missing operands the way coreutils does.
pub(crate) fn split_operands<'a>(tool: &str, operands: &'a [String]) -> Result<(&'a [String], &'a str), ExecResult> {
    match operands {
        [] => Err(ExecResult::failure(1, format!("{}: missing file operand", tool))),
        [only] => Err(ExecResult::failure(
            1,
            format!("{}: missing destination file operand after '{}'", tool, only),
        )),
        [sources @ .., dest] => Ok((sources, dest.as_str())),
    }
}

/// Where `src` lands: inside `dest` when it is an existing directory.
pub(crate) fn target_path(src: &VfsPath, dest: &VfsPath, dest_is_dir: bool) -> VfsPath {
    match (dest_is_dir, src.file_name()) {
        (true, Some(name)) => dest.join(name),
        _ => dest.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{make_ctx, read, write};

    fn cp(ctx: &mut ExecContext, recursive: bool, operands: &[&str]) -> ExecResult {
        let mut args = ToolArgs::positional(operands.iter().copied());
        if recursive {
            args.flags.insert("recursive".into());
        }
        Cp.execute(args, ctx)
    }

    #[test]
    fn test_cp_file() {
        let mut ctx = make_ctx();
        write(&ctx, "a", "data");
        assert!(cp(&mut ctx, false, &["a", "b"]).ok());
        assert_eq!(read(&ctx, "b").as_deref(), Some("data"));
        assert_eq!(read(&ctx, "a").as_deref(), Some("data"));
    }

    #[test]
    fn test_cp_into_directory() {
        let mut ctx = make_ctx();
        write(&ctx, "a", "data");
        assert!(cp(&mut ctx, false, &["a", "Desktop"]).ok());
        assert_eq!(read(&ctx, "Desktop/a").as_deref(), Some("data"));
    }

    #[test]
    fn test_cp_directory_needs_recursive() {
        let mut ctx = make_ctx();
        let result = cp(&mut ctx, false, &["Documents", "Docs2"]);
        assert_eq!(result.err, "cp: -r not specified; omitting directory 'Documents'");

        assert!(cp(&mut ctx, true, &["Documents", "Docs2"]).ok());
        assert!(read(&ctx, "Docs2/readme.txt").is_some());
    }

    #[test]
    fn test_cp_into_itself() {
        let mut ctx = make_ctx();
        let result = cp(&mut ctx, true, &["Documents", "Documents/inner"]);
        assert!(result.err.contains("into itself"));
    }

    #[test]
    fn test_cp_onto_itself_is_same_file() {
        let mut ctx = make_ctx();
        write(&ctx, "a", "data");
        let result = cp(&mut ctx, false, &["a", "."]);
        assert_eq!(result.err, "cp: 'a' and '.' are the same file");
        assert_eq!(result.code, 1);
        assert_eq!(read(&ctx, "a").as_deref(), Some("data"));
    }

    #[test]
    fn test_cp_operand_errors() {
        let mut ctx = make_ctx();
        assert_eq!(cp(&mut ctx, false, &[]).err, "cp: missing file operand");
        assert_eq!(
            cp(&mut ctx, false, &["a"]).err,
            "cp: missing destination file operand after 'a'"
        );
        assert_eq!(
            cp(&mut ctx, false, &["nope", "x"]).err,
            "cp: cannot stat 'nope': No such file or directory"
        );
        write(&ctx, "a", "");
        write(&ctx, "b", "");
        assert_eq!(
            cp(&mut ctx, false, &["a", "b", "c"]).err,
            "cp: target 'c' is not a directory"
        );
    }
}
