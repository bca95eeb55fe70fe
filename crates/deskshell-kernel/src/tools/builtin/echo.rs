//! echo — Print arguments.

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

/// Echo tool: prints arguments joined by single spaces.
///
/// Takes its words verbatim, so `echo -n` prints `-n`.
pub struct Echo;

impl Tool for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("echo", "Print arguments")
            .with_raw_args()
            .param(ParamSchema::optional("args", "string", None, "Words to print"))
            .example("Write a file", "echo hello > greeting.txt")
    }

    fn execute(&self, args: ToolArgs, _ctx: &mut ExecContext) -> ExecResult {
        ExecResult::success(args.positional.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::make_ctx;

    #[test]
    fn test_echo_joins_with_single_spaces() {
        let mut ctx = make_ctx();
        let result = Echo.execute(ToolArgs::positional(["hello", "big  world"]), &mut ctx);
        assert_eq!(result.out, "hello big  world");
    }

    #[test]
    fn test_echo_empty() {
        let mut ctx = make_ctx();
        let result = Echo.execute(ToolArgs::new(), &mut ctx);
        assert!(result.ok());
        assert_eq!(result.out, "");
    }
}
