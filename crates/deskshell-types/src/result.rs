//! ExecResult — the structured result of every builtin execution.

use serde::{Deserialize, Serialize};

/// The result of executing a builtin or a pipeline.
///
/// `out` is canonical plain text: it is what flows through pipes and what
/// redirection writes. `rendered` optionally carries the same text with
/// display-only markup (highlights, colours) for the session log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    pub code: i64,
    /// Plain standard output.
    pub out: String,
    /// Error text (Unix-style message lines).
    pub err: String,
    /// Marked-up variant of `out` for display, if the tool produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
    /// The session should wipe its visible log.
    #[serde(default)]
    pub clear: bool,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            ..Self::default()
        }
    }

    /// Create a successful result with plain output and a marked-up display form.
    pub fn success_rendered(out: impl Into<String>, rendered: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            rendered: Some(rendered.into()),
            ..Self::default()
        }
    }

    /// Create a failed result with an error message.
    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            err: err.into(),
            ..Self::default()
        }
    }

    /// A result asking the session to clear its log.
    pub fn clear_screen() -> Self {
        Self {
            clear: true,
            ..Self::default()
        }
    }

    /// True if the command succeeded (exit code 0).
    pub fn ok(&self) -> bool {
        self.code == 0
    }

    /// Text to show in the session log: the rendered form if present.
    pub fn display_text(&self) -> &str {
        self.rendered.as_deref().unwrap_or(&self.out)
    }
}
