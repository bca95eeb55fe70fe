//! Help system for deskshell.
//!
//! Topic text is embedded at compile time; builtin listings and per-command
//! help are generated from the tool registry's schemas.

use crate::tools::ToolSchema;

/// Help topics available in deskshell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpTopic {
    /// What the shell is, list of topics.
    Overview,
    /// Quoting, pipes, redirection, paths.
    Syntax,
    /// List of all available builtins.
    Builtins,
    /// Help for a specific tool.
    Tool(String),
}

impl HelpTopic {
    /// Parse a topic string. Anything unrecognised is taken as a tool name.
    pub fn parse_topic(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "" | "overview" => Self::Overview,
            "syntax" | "pipes" | "quoting" => Self::Syntax,
            "builtins" | "commands" => Self::Builtins,
            other => Self::Tool(other.to_string()),
        }
    }
}

const OVERVIEW: &str = include_str!("../docs/help/overview.md");
const SYNTAX: &str = include_str!("../docs/help/syntax.md");

/// Get help content for a topic.
///
/// Returns `None` when a `Tool` topic names no registered tool.
pub fn get_help(topic: &HelpTopic, tool_schemas: &[ToolSchema]) -> Option<String> {
    match topic {
        HelpTopic::Overview => Some(format!("{}\n\n{}", OVERVIEW.trim_end(), format_tool_list(tool_schemas))),
        HelpTopic::Syntax => Some(SYNTAX.trim_end().to_string()),
        HelpTopic::Builtins => Some(format_tool_list(tool_schemas)),
        HelpTopic::Tool(name) => tool_schemas
            .iter()
            .find(|s| s.name == *name)
            .map(format_tool_help),
    }
}

/// Usage line, description, options and examples for one tool.
fn format_tool_help(schema: &ToolSchema) -> String {
    let mut lines = vec![
        format!("Usage: {}", schema.usage()),
        String::new(),
        schema.description.clone(),
    ];

    let options: Vec<_> = schema.params.iter().filter(|p| !p.aliases.is_empty()).collect();
    if !options.is_empty() {
        lines.push(String::new());
        lines.push("Options:".to_string());
        for param in options {
            lines.push(format!("  {:<18} {}", param.aliases.join(", "), param.description));
        }
    }

    if !schema.examples.is_empty() {
        lines.push(String::new());
        lines.push("Examples:".to_string());
        for example in &schema.examples {
            lines.push(format!("  {:<28} # {}", example.code, example.description));
        }
    }

    lines.join("\n")
}

/// Two-column list of every builtin, sorted by name.
fn format_tool_list(schemas: &[ToolSchema]) -> String {
    let mut entries: Vec<(&str, &str)> = schemas
        .iter()
        .map(|s| (s.name.as_str(), s.description.as_str()))
        .collect();
    entries.sort_unstable();

    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut lines = vec!["Built-in commands:".to_string()];
    lines.extend(
        entries
            .iter()
            .map(|(name, desc)| format!("  {:width$}  {}", name, desc, width = width)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ParamSchema;

    fn schemas() -> Vec<ToolSchema> {
        vec![
            ToolSchema::new("ls", "List directory contents")
                .param(ParamSchema::flag("all", "Show hidden entries").with_aliases(["-a", "--all"]))
                .param(ParamSchema::optional("path", "string", Some("."), "Directory to list"))
                .example("Everything", "ls -la"),
            ToolSchema::new("cat", "Concatenate files"),
        ]
    }

    #[test]
    fn test_parse_topic() {
        assert_eq!(HelpTopic::parse_topic(""), HelpTopic::Overview);
        assert_eq!(HelpTopic::parse_topic("Syntax"), HelpTopic::Syntax);
        assert_eq!(HelpTopic::parse_topic("builtins"), HelpTopic::Builtins);
        assert_eq!(HelpTopic::parse_topic("ls"), HelpTopic::Tool("ls".into()));
    }

    #[test]
    fn test_builtins_sorted() {
        let text = get_help(&HelpTopic::Builtins, &schemas()).unwrap_or_default();
        let cat = text.find("cat").unwrap_or(usize::MAX);
        let ls = text.find("ls ").unwrap_or(0);
        assert!(cat < ls);
    }

    #[test]
    fn test_tool_help() {
        let text = get_help(&HelpTopic::Tool("ls".into()), &schemas()).unwrap_or_default();
        assert!(text.starts_with("Usage: ls [-a] [path]"));
        assert!(text.contains("-a, --all"));
        assert!(text.contains("ls -la"));
    }

    #[test]
    fn test_unknown_tool() {
        assert!(get_help(&HelpTopic::Tool("nope".into()), &schemas()).is_none());
    }

    #[test]
    fn test_overview_lists_builtins() {
        let text = get_help(&HelpTopic::Overview, &schemas()).unwrap_or_default();
        assert!(text.contains("help syntax"));
        assert!(text.contains("Built-in commands:"));
        assert!(!text.ends_with('\n'));
    }
}
