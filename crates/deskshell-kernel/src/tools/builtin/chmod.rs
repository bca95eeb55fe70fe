//! chmod — Change (cosmetic) permissions.

use deskshell_types::{ExecResult, NodeKind, ParamSchema, ToolArgs, ToolSchema};

use super::Diagnostics;
use crate::tools::{ExecContext, Tool};
use crate::vfs::Permissions;

/// Chmod tool: rewrite a node's permission string.
///
/// Words are taken verbatim so modes like `-x` aren't read as flags.
pub struct Chmod;

impl Tool for Chmod {
    fn name(&self) -> &str {
        "chmod"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("chmod", "Change file mode bits")
            .with_raw_args()
            .param(ParamSchema::required("mode", "string", "Octal (755) or symbolic (u+x,go-w) mode"))
            .param(ParamSchema::required("path", "string", "Path(s) to change"))
            .example("Make a script executable", "chmod +x run.sh")
            .example("Private file", "chmod 600 notes.txt")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let (mode, paths) = match args.positional.as_slice() {
            [] => return ExecResult::failure(1, "chmod: missing operand"),
            [mode] => return ExecResult::failure(1, format!("chmod: missing operand after '{}'", mode)),
            [mode, paths @ ..] => (mode, paths),
        };

        // Reject a bad mode before touching anything.
        if Permissions::default_for(NodeKind::File).apply_mode(mode).is_err() {
            return ExecResult::failure(1, format!("chmod: invalid mode: '{}'", mode));
        }

        let mut diag = Diagnostics::default();
        for operand in paths {
            if let Err(e) = ctx.vfs.chmod(&ctx.resolve_path(operand), mode) {
                diag.fs("chmod: cannot access", operand, &e);
            }
        }
        diag.finish(String::new())
    }
}
