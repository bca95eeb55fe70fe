//! Tool schema and argument types.

use std::collections::{HashMap, HashSet};

/// Schema for a tool parameter.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    /// Parameter name.
    pub name: String,
    /// Type hint (string, int, bool).
    pub param_type: String,
    /// Whether this parameter is required.
    pub required: bool,
    /// Default value rendered for help text, if any.
    pub default: Option<String>,
    /// Description for help text.
    pub description: String,
    /// Alternative names/flags for this parameter (e.g., "-a", "--all" for "all").
    pub aliases: Vec<String>,
}

impl ParamSchema {
    /// Create a required parameter.
    pub fn required(name: impl Into<String>, param_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: true,
            default: None,
            description: description.into(),
            aliases: Vec::new(),
        }
    }

    /// Create an optional parameter with an optional default value.
    pub fn optional(
        name: impl Into<String>,
        param_type: impl Into<String>,
        default: Option<&str>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: false,
            default: default.map(str::to_string),
            description: description.into(),
            aliases: Vec::new(),
        }
    }

    /// Create an optional boolean flag.
    pub fn flag(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::optional(name, "bool", Some("false"), description)
    }

    /// Add alternative names/flags for this parameter.
    ///
    /// Aliases are used for short flags like `-a` that map to `all`.
    pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Check if a flag name matches this parameter or any of its aliases.
    pub fn matches_flag(&self, flag: &str) -> bool {
        if self.name == flag {
            return true;
        }
        self.aliases.iter().any(|a| a == flag)
    }

    /// True if this parameter is a boolean switch rather than a value-taking option.
    pub fn is_bool(&self) -> bool {
        self.param_type == "bool"
    }
}

/// An example showing how to use a tool.
#[derive(Debug, Clone)]
pub struct Example {
    /// Short description of what the example demonstrates.
    pub description: String,
    /// The example command line.
    pub code: String,
}

impl Example {
    /// Create a new example.
    pub fn new(description: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            code: code.into(),
        }
    }
}

/// Schema describing a tool's interface.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    /// Tool name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Parameter definitions.
    pub params: Vec<ParamSchema>,
    /// Usage examples.
    pub examples: Vec<Example>,
    /// Pass every word through as a positional argument, without flag parsing.
    /// `echo -n` prints `-n`; builtins that take free text set this.
    pub raw_args: bool,
}

impl ToolSchema {
    /// Create a new tool schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            examples: Vec::new(),
            raw_args: false,
        }
    }

    /// Disable flag parsing for this tool.
    pub fn with_raw_args(mut self) -> Self {
        self.raw_args = true;
        self
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// Add an example to the schema.
    pub fn example(mut self, description: impl Into<String>, code: impl Into<String>) -> Self {
        self.examples.push(Example::new(description, code));
        self
    }

    /// Find the parameter a flag (`-a`, `--all`, `all`) refers to.
    pub fn param_for_flag(&self, flag: &str) -> Option<&ParamSchema> {
        self.params.iter().find(|p| p.matches_flag(flag))
    }

    /// All dash-prefixed flag spellings, in declaration order.
    ///
    /// This is the per-command flag table used by tab completion.
    pub fn flag_table(&self) -> Vec<&str> {
        self.params
            .iter()
            .flat_map(|p| p.aliases.iter())
            .filter(|a| a.starts_with('-'))
            .map(String::as_str)
            .collect()
    }

    /// One-line usage string, e.g. `head [-n N] [path]`.
    pub fn usage(&self) -> String {
        let mut parts = vec![self.name.clone()];
        for param in &self.params {
            let flag = param.aliases.iter().find(|a| a.starts_with('-'));
            let piece = match (flag, param.is_bool()) {
                (Some(flag), true) => format!("[{}]", flag),
                (Some(flag), false) => format!("[{} {}]", flag, param.name.to_uppercase()),
                (None, _) if param.required => param.name.clone(),
                (None, _) => format!("[{}]", param.name),
            };
            parts.push(piece);
        }
        parts.join(" ")
    }
}

/// Parsed arguments ready for tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Positional arguments in order.
    pub positional: Vec<String>,
    /// Named (value-taking) options by canonical parameter name.
    pub named: HashMap<String, String>,
    /// Boolean flags by canonical parameter name (e.g., `-l` sets `long`).
    pub flags: HashSet<String>,
}

impl ToolArgs {
    /// Create empty args.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create args holding only positional words.
    pub fn positional<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Get a positional argument by index.
    pub fn get_positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Get a named option value.
    pub fn get_named(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Check if a flag is set.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }
}
