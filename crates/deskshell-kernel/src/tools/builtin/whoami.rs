//! whoami — Print the current user.

use deskshell_types::{ExecResult, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

pub struct Whoami;

impl Tool for Whoami {
    fn name(&self) -> &str {
        "whoami"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("whoami", "Print the current user name")
    }

    fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        ExecResult::success(ctx.user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::make_ctx;

    #[test]
    fn test_whoami() {
        let mut ctx = make_ctx();
        assert_eq!(Whoami.execute(ToolArgs::new(), &mut ctx).out, "user");
    }
}
