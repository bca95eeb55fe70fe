//! kill — Close a window by its pseudo-PID.

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use super::ps::SYSTEM_PROCESSES;
use crate::tools::{ExecContext, Tool};
use crate::windows::pseudo_pid;

/// Kill tool: map a PID from `ps` back to a window and close it.
///
/// Signal options (`-9`, `-TERM`) are accepted and ignored; only the last
/// word is read as the PID.
pub struct Kill;

impl Tool for Kill {
    fn name(&self) -> &str {
        "kill"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("kill", "Terminate a process (close its window)")
            .with_raw_args()
            .param(ParamSchema::required("pid", "int", "Process ID as shown by ps"))
            .example("Close a window", "kill 4821")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(raw) = args.positional.iter().rev().find(|w| !w.starts_with('-')) else {
            return ExecResult::failure(2, "kill: usage: kill [-s sigspec | -n signum | -sigspec] pid");
        };

        let Ok(pid) = raw.parse::<u32>() else {
            return ExecResult::failure(1, format!("kill: {}: arguments must be process or job IDs", raw));
        };

        if SYSTEM_PROCESSES.iter().any(|(system_pid, _, _)| *system_pid == pid) {
            return ExecResult::failure(1, format!("kill: ({}) - Operation not permitted", pid));
        }

        let target = ctx
            .windows
            .windows()
            .into_iter()
            .find(|w| pseudo_pid(&w.id) == pid);

        match target {
            Some(window) if ctx.windows.close(&window.id) => {
                tracing::debug!(pid, window = %window.id, "window killed");
                ExecResult::success("")
            }
            _ => ExecResult::failure(1, format!("kill: ({}) - No such process", pid)),
        }
    }
}
