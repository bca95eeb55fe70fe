//! ps — List pseudo-processes.
//!
//! A few fixed system rows, then one row per open window. Window PIDs come
//! from [`pseudo_pid`], so `kill` can map them back.

use deskshell_types::{ExecResult, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};
use crate::windows::pseudo_pid;

/// Fixed system rows: (pid, owned by root, command).
pub(super) const SYSTEM_PROCESSES: &[(u32, bool, &str)] = &[
    (1, true, "init"),
    (2, true, "kthreadd"),
    (87, true, "dbus-daemon"),
    (112, false, "window-manager"),
];

/// Ps tool: list processes.
pub struct Ps;

impl Tool for Ps {
    fn name(&self) -> &str {
        "ps"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ps", "List running processes and open windows")
            .example("Find a window's PID", "ps | grep browser")
    }

    fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let user = ctx.user().to_string();
        let mut lines = vec![row("PID", "USER", "COMMAND")];

        for (pid, root_owned, command) in SYSTEM_PROCESSES {
            let owner = if *root_owned { "root" } else { user.as_str() };
            lines.push(row(&pid.to_string(), owner, command));
        }
        for window in ctx.windows.windows() {
            lines.push(row(&pseudo_pid(&window.id).to_string(), &user, &window.app));
        }

        ExecResult::success(lines.join("\n"))
    }
}

fn row(pid: &str, user: &str, command: &str) -> String {
    format!("{:>5} {:<8} {}", pid, user, command)
}
