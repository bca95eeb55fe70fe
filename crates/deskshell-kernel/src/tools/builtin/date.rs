//! date — Display current date and time.

use std::fmt::Write;

use chrono::{Local, Utc};
use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use crate::tools::{ExecContext, Tool};

/// Output format when none is given, matching coreutils in the C locale.
const DEFAULT_FORMAT: &str = "%a %b %e %H:%M:%S %Z %Y";

/// Date tool: display current date/time.
pub struct Date;

impl Tool for Date {
    fn name(&self) -> &str {
        "date"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("date", "Display current date and time")
            .param(ParamSchema::flag("utc", "Use UTC instead of local time (-u)").with_aliases(["-u", "--utc"]))
            .param(ParamSchema::optional("format", "string", None, "+FORMAT, strftime style"))
            .example("Default", "date")
            .example("ISO day", "date +%Y-%m-%d")
    }

    fn execute(&self, args: ToolArgs, _ctx: &mut ExecContext) -> ExecResult {
        let format = match args.get_positional(0) {
            None => DEFAULT_FORMAT,
            Some(raw) => match raw.strip_prefix('+') {
                Some(format) => format,
                None => return ExecResult::failure(1, format!("date: invalid date '{}'", raw)),
            },
        };

        // An unknown specifier makes chrono's Display fail; report it instead.
        let mut out = String::new();
        let written = if args.has_flag("utc") {
            write!(out, "{}", Utc::now().format(format))
        } else {
            write!(out, "{}", Local::now().format(format))
        };
        match written {
            Ok(()) => ExecResult::success(out),
            Err(_) => ExecResult::failure(1, format!("date: invalid format '{}'", format)),
        }
    }
}
