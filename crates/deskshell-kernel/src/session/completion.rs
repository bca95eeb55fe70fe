//! Tab completion.
//!
//! Completion looks only at the last token of the input and tries, in order:
//!
//! 1. the only token → builtin command names
//! 2. a token starting with `-` → the command's flags
//! 3. anything else → entries of the directory the token points into
//!    (the working directory for a bare name)
//!
//! The first candidate of the first applicable rule wins. Repeated presses
//! don't cycle.

use crate::tools::ToolRegistry;
use crate::vfs::{VfsEngine, VfsPath};

/// Complete `input`, returning the new line, or `None` if nothing matches.
pub fn complete_line(input: &str, tools: &ToolRegistry, vfs: &VfsEngine, cwd: &VfsPath) -> Option<String> {
    let token_start = input
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let (head, token) = input.split_at(token_start);

    let completed = if head.trim().is_empty() {
        complete_command(token, tools)?
    } else if token.starts_with('-') {
        let command = head.split_whitespace().next()?;
        complete_flag(command, token, tools)?
    } else {
        complete_path(token, vfs, cwd)?
    };

    let line = format!("{}{}", head, completed);
    (line != input).then_some(line)
}

fn complete_command(prefix: &str, tools: &ToolRegistry) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }
    tools.names().find(|name| name.starts_with(prefix)).map(str::to_string)
}

fn complete_flag(command: &str, prefix: &str, tools: &ToolRegistry) -> Option<String> {
    let schema = tools.get(command)?.schema();
    schema
        .flag_table()
        .into_iter()
        .find(|flag| flag.starts_with(prefix))
        .map(str::to_string)
}

/// `Docu` → `Documents/`; `Documents/re` → `Documents/readme.txt`.
fn complete_path(token: &str, vfs: &VfsEngine, cwd: &VfsPath) -> Option<String> {
    let (dir_part, prefix) = match token.rfind('/') {
        Some(i) => token.split_at(i + 1),
        None => ("", token),
    };
    let dir = if dir_part.is_empty() {
        cwd.clone()
    } else {
        vfs.resolve_path(cwd, dir_part)
    };

    let mut entries = vfs.read_dir(&dir).ok()?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let show_hidden = prefix.starts_with('.');
    let entry = entries
        .into_iter()
        .filter(|e| show_hidden || !e.is_hidden())
        .find(|e| e.name.starts_with(prefix))?;

    let suffix = if entry.is_dir() { "/" } else { "" };
    Some(format!("{}{}{}", dir_part, entry.name, suffix))
}
