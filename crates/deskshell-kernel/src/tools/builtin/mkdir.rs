//! mkdir — Create directories.

use deskshell_types::{ExecResult, NodeKind, ParamSchema, ToolArgs, ToolSchema};

use super::Diagnostics;
use crate::tools::{ExecContext, Tool};
use crate::vfs::{VfsError, VfsPath};

/// Mkdir tool: create directories.
pub struct Mkdir;

impl Tool for Mkdir {
    fn name(&self) -> &str {
        "mkdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("mkdir", "Create directories")
            .param(ParamSchema::flag("parents", "Create missing parent directories, no error if existing (-p)").with_aliases(["-p", "--parents"]))
            .param(ParamSchema::required("path", "string", "Directory path(s) to create"))
            .example("Nested project folder", "mkdir -p Documents/projects/demo")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        if args.positional.is_empty() {
            return ExecResult::failure(1, "mkdir: missing operand");
        }
        let parents = args.has_flag("parents");

        let mut diag = Diagnostics::default();
        for operand in &args.positional {
            let path = ctx.resolve_path(operand);
            let created = if parents {
                make_parents(ctx, &path)
            } else {
                ctx.vfs.make_dir(&path)
            };
            if let Err(e) = created {
                diag.fs("mkdir: cannot create directory", operand, &e);
            }
        }
        diag.finish(String::new())
    }
}

/// Create each missing ancestor, one level at a time, then the target.
/// An existing directory anywhere along the way is fine.
fn make_parents(ctx: &ExecContext, path: &VfsPath) -> Result<(), VfsError> {
    let mut current = VfsPath::root();
    for segment in path.segments() {
        current = current.join(segment.as_str());
        match ctx.vfs.kind(&current) {
            Ok(NodeKind::Directory) => {}
            Ok(NodeKind::File) => return Err(VfsError::NotADirectory(current.to_string())),
            Err(VfsError::NotFound(_)) => ctx.vfs.make_dir(&current)?,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
