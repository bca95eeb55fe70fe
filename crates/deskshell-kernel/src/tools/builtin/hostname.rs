//! hostname — Print the system hostname.

use deskshell_types::{ExecResult, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

pub struct Hostname;

impl Tool for Hostname {
    fn name(&self) -> &str {
        "hostname"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("hostname", "Print the system hostname")
    }

    fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        ExecResult::success(ctx.system.hostname.clone())
    }
}
