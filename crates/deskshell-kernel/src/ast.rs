//! AST type definitions.
//!
//! A submitted line parses to exactly one [`Pipeline`]. There are no
//! statements, variables or control flow.

use std::fmt;

/// `cmd args... | cmd args... [> target]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    /// At least one command, run left to right.
    pub commands: Vec<Command>,
    /// Applies to the output of the whole pipeline.
    pub redirect: Option<Redirect>,
}

/// A command invocation: name plus argument words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

/// Output redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `>`
    Overwrite,
    /// `>>`
    Append,
}

impl Command {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectKind::Overwrite => write!(f, ">"),
            RedirectKind::Append => write!(f, ">>"),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", cmd.name)?;
            for arg in &cmd.args {
                write!(f, " {}", arg)?;
            }
        }
        if let Some(redirect) = &self.redirect {
            write!(f, " {} {}", redirect.kind, redirect.target)?;
        }
        Ok(())
    }
}
