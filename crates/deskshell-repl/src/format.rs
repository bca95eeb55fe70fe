//! Output formatting for the REPL.
//!
//! Turns session log entries into terminal text. Two audiences:
//!
//! - **Interactive** → builtin markup kept, errors in red, coloured prompt
//! - **Piped** → plain text only

use std::io::IsTerminal;

use deskshell_kernel::LogEntry;
use deskshell_kernel::tools::markup::strip_markup;
use owo_colors::OwoColorize;

/// Who is reading stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputContext {
    Interactive,
    Piped,
}

/// Detect the output context based on terminal state.
pub fn detect_context() -> OutputContext {
    if std::io::stdout().is_terminal() {
        OutputContext::Interactive
    } else {
        OutputContext::Piped
    }
}

/// Format one log entry, or `None` for entries the line editor already
/// showed (the echoed command, the `^C` line).
pub fn format_entry(entry: &LogEntry, context: OutputContext) -> Option<String> {
    match (entry, context) {
        (LogEntry::Command { .. } | LogEntry::Interrupted { .. }, _) => None,
        (LogEntry::Output(text), OutputContext::Interactive) => Some(text.clone()),
        (LogEntry::Output(text), OutputContext::Piped) => Some(strip_markup(text)),
        (LogEntry::Error(text), OutputContext::Interactive) => Some(text.red().to_string()),
        (LogEntry::Error(text), OutputContext::Piped) => Some(text.clone()),
        (LogEntry::Delegated(text), _) => Some(text.clone()),
    }
}

/// Format a run of entries, one per line. `None` if nothing is visible.
pub fn format_entries(entries: &[LogEntry], context: OutputContext) -> Option<String> {
    let lines: Vec<String> = entries.iter().filter_map(|e| format_entry(e, context)).collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// The prompt, split at `:` into a green identity and a blue path.
pub fn format_prompt(prompt: &str, context: OutputContext) -> String {
    if context == OutputContext::Piped {
        return prompt.to_string();
    }
    let body = prompt.trim_end().trim_end_matches('$');
    match body.split_once(':') {
        Some((who, path)) => format!("{}:{}$ ", who.green().bold(), path.blue().bold()),
        None => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_not_reprinted() {
        let entry = LogEntry::Command {
            prompt: "user@deskshell:~$ ".into(),
            line: "ls".into(),
        };
        assert_eq!(format_entry(&entry, OutputContext::Interactive), None);
    }

    #[test]
    fn test_piped_strips_markup() {
        let entry = LogEntry::Output("\x1b[1;34mDocuments\x1b[0m".into());
        assert_eq!(format_entry(&entry, OutputContext::Piped).as_deref(), Some("Documents"));
    }

    #[test]
    fn test_piped_errors_are_plain() {
        let entry = LogEntry::Error("cat: x: No such file or directory".into());
        assert_eq!(
            format_entry(&entry, OutputContext::Piped).as_deref(),
            Some("cat: x: No such file or directory")
        );
    }

    #[test]
    fn test_entries_join_visible_only() {
        let entries = vec![
            LogEntry::Command {
                prompt: String::new(),
                line: "x".into(),
            },
            LogEntry::Output("a".into()),
            LogEntry::Delegated("b".into()),
        ];
        assert_eq!(format_entries(&entries, OutputContext::Piped).as_deref(), Some("a\nb"));
        assert_eq!(format_entries(&entries[..1], OutputContext::Piped), None);
    }

    #[test]
    fn test_prompt_plain_when_piped() {
        assert_eq!(format_prompt("u@h:~$ ", OutputContext::Piped), "u@h:~$ ");
        let coloured = format_prompt("u@h:~$ ", OutputContext::Interactive);
        assert!(coloured.ends_with("$ "));
        assert!(coloured.contains('\x1b'));
    }
}
