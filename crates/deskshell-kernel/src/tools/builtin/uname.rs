//! uname — Print system identification.
//!
//! ```text
//! uname        # Linux
//! uname -a     # Linux deskshell 6.1.0-desktop #1 SMP PREEMPT_DYNAMIC x86_64 GNU/Linux
//! uname -nm    # deskshell x86_64
//! ```

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

const KERNEL_VERSION: &str = "#1 SMP PREEMPT_DYNAMIC";
const OPERATING_SYSTEM: &str = "GNU/Linux";

/// Uname tool: print system identification.
pub struct Uname;

impl Tool for Uname {
    fn name(&self) -> &str {
        "uname"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("uname", "Print system identification")
            .param(ParamSchema::flag("all", "Print all information").with_aliases(["-a", "--all"]))
            .param(ParamSchema::flag("kernel_name", "Print the kernel name (default)").with_aliases(["-s"]))
            .param(ParamSchema::flag("nodename", "Print the network node hostname").with_aliases(["-n"]))
            .param(ParamSchema::flag("kernel_release", "Print the kernel release").with_aliases(["-r"]))
            .param(ParamSchema::flag("machine", "Print the machine hardware name").with_aliases(["-m"]))
            .example("All info", "uname -a")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let system = &ctx.system;
        if args.has_flag("all") {
            return ExecResult::success(format!(
                "{} {} {} {} {} {}",
                system.kernel_name,
                system.hostname,
                system.kernel_release,
                KERNEL_VERSION,
                system.machine,
                OPERATING_SYSTEM
            ));
        }

        let fields = [
            ("kernel_name", &system.kernel_name),
            ("nodename", &system.hostname),
            ("kernel_release", &system.kernel_release),
            ("machine", &system.machine),
        ];
        let selected: Vec<&str> = fields
            .iter()
            .filter(|(flag, _)| args.has_flag(flag))
            .map(|(_, value)| value.as_str())
            .collect();

        if selected.is_empty() {
            return ExecResult::success(system.kernel_name.clone());
        }
        ExecResult::success(selected.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::make_ctx;

    fn uname(flags: &[&str]) -> String {
        let mut ctx = make_ctx();
        let mut args = ToolArgs::new();
        args.flags.extend(flags.iter().map(|f| f.to_string()));
        Uname.execute(args, &mut ctx).out
    }

    #[test]
    fn test_uname_default() {
        assert_eq!(uname(&[]), "Linux");
    }

    #[test]
    fn test_uname_all() {
        assert_eq!(
            uname(&["all"]),
            "Linux deskshell 6.1.0-desktop #1 SMP PREEMPT_DYNAMIC x86_64 GNU/Linux"
        );
    }

    #[test]
    fn test_uname_selected_fields_keep_order() {
        assert_eq!(uname(&["machine", "nodename"]), "deskshell x86_64");
    }
}
