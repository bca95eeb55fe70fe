//! touch — Create empty files.

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use super::Diagnostics;
use crate::tools::{ExecContext, Tool};

/// Touch tool: create a file if it doesn't exist. Existing nodes are left alone.
pub struct Touch;

impl Tool for Touch {
    fn name(&self) -> &str {
        "touch"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("touch", "Create empty files")
            .param(ParamSchema::required("path", "string", "File path(s) to create"))
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        if args.positional.is_empty() {
            return ExecResult::failure(1, "touch: missing file operand");
        }

        let mut diag = Diagnostics::default();
        for operand in &args.positional {
            let path = ctx.resolve_path(operand);
            if ctx.vfs.exists(&path) {
                continue;
            }
            if let Err(e) = ctx.vfs.write_file(&path, "") {
                diag.fs("touch: cannot touch", operand, &e);
            }
        }
        diag.finish(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{make_ctx, read, write};

    #[test]
    fn test_touch_creates_empty() {
        let mut ctx = make_ctx();
        let result = Touch.execute(ToolArgs::positional(["a", "b"]), &mut ctx);
        assert!(result.ok());
        assert_eq!(read(&ctx, "a").as_deref(), Some(""));
        assert_eq!(read(&ctx, "b").as_deref(), Some(""));
    }

    #[test]
    fn test_touch_existing_untouched() {
        let mut ctx = make_ctx();
        write(&ctx, "keep", "content");
        let before = ctx.vfs.stat(&ctx.resolve_path("keep")).unwrap();
        assert!(Touch.execute(ToolArgs::positional(["keep"]), &mut ctx).ok());
        assert_eq!(read(&ctx, "keep").as_deref(), Some("content"));
        assert_eq!(ctx.vfs.stat(&ctx.resolve_path("keep")).unwrap(), before);
    }

    #[test]
    fn test_touch_missing_parent() {
        let mut ctx = make_ctx();
        let result = Touch.execute(ToolArgs::positional(["no/such"]), &mut ctx);
        assert_eq!(result.err, "touch: cannot touch 'no/such': No such file or directory");
    }
}
