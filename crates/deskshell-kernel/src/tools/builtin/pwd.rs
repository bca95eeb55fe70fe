//! pwd — Print working directory.

use deskshell_types::{ExecResult, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

/// Pwd tool: print current working directory.
pub struct Pwd;

impl Tool for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("pwd", "Print current working directory")
    }

    fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        ExecResult::success(ctx.cwd.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::make_ctx;
    use crate::vfs::VfsPath;

    #[test]
    fn test_pwd_home() {
        let mut ctx = make_ctx();
        assert_eq!(Pwd.execute(ToolArgs::new(), &mut ctx).out, "/home/user");
    }

    #[test]
    fn test_pwd_root() {
        let mut ctx = make_ctx();
        ctx.set_cwd(VfsPath::root());
        assert_eq!(Pwd.execute(ToolArgs::new(), &mut ctx).out, "/");
    }
}
