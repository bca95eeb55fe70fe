//! Built-in tools for deskshell.
//!
//! These tools are always available. File tools are thin wrappers over the
//! VFS engine that turn engine errors into coreutils-style messages; they
//! never fail hard.

mod cat;
mod cd;
mod chmod;
mod clear;
mod cp;
mod date;
mod echo;
mod grep;
mod head;
mod help;
mod history;
mod hostname;
mod kill;
mod ls;
mod mkdir;
mod mv;
mod ps;
mod pwd;
mod rm;
mod tail;
mod touch;
mod uname;
mod whoami;

use deskshell_types::ExecResult;

use super::ToolRegistry;
use crate::vfs::VfsError;

/// Register all built-in tools with the registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(cat::Cat);
    registry.register(cd::Cd);
    registry.register(chmod::Chmod);
    registry.register(clear::Clear);
    registry.register(cp::Cp);
    registry.register(date::Date);
    registry.register(echo::Echo);
    registry.register(grep::Grep);
    registry.register(head::Head);
    registry.register(help::Help);
    registry.register(history::History);
    registry.register(hostname::Hostname);
    registry.register(kill::Kill);
    registry.register(ls::Ls);
    registry.register(mkdir::Mkdir);
    registry.register(mv::Mv);
    registry.register(ps::Ps);
    registry.register(pwd::Pwd);
    registry.register(rm::Rm);
    registry.register(tail::Tail);
    registry.register(touch::Touch);
    registry.register(uname::Uname);
    registry.register(whoami::Whoami);
}

/// Collects per-operand errors for tools that keep going after a failure,
/// the way `rm a b c` reports each missing file and still removes the rest.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    lines: Vec<String>,
}

impl Diagnostics {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// `prefix: 'operand': <unix message>`
    pub fn fs(&mut self, prefix: &str, operand: &str, err: &VfsError) {
        self.push(format!("{} '{}': {}", prefix, operand, err.unix_message()));
    }

    /// Combine with stdout: exit code 1 if anything was reported.
    pub fn finish(self, out: String) -> ExecResult {
        if self.lines.is_empty() {
            return ExecResult::success(out);
        }
        ExecResult {
            code: 1,
            out,
            err: self.lines.join("\n"),
            ..ExecResult::default()
        }
    }
}

/// Parse a line count for `head`/`tail`.
pub(crate) fn parse_count(tool: &str, raw: &str) -> Result<usize, ExecResult> {
    raw.parse::<usize>().map_err(|_| {
        ExecResult::failure(1, format!("{}: invalid number of lines: '{}'", tool, raw))
    })
}

/// Split `head`/`tail` positionals into the legacy `-N` count and the path.
pub(crate) fn legacy_count_and_path(positional: &[String]) -> (Option<&str>, Option<&str>) {
    let mut count = None;
    let mut path = None;
    for word in positional {
        match word.strip_prefix('-') {
            Some(digits) if count.is_none() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                count = Some(digits);
            }
            _ if path.is_none() => path = Some(word.as_str()),
            _ => {}
        }
    }
    (count, path)
}
