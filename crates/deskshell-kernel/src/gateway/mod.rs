//! Fallback gateway: answers command lines the builtins can't.
//!
//! A session hands the whole original line to the gateway along with the
//! working directory and a contents-free snapshot of the filesystem, and
//! shows whatever text comes back. The gateway is asked not to use markdown
//! but isn't trusted to comply, so callers run [`strip_code_fences`] on
//! every answer.

mod http;
mod offline;

use async_trait::async_trait;
use deskshell_types::NodeSnapshot;
use serde::Serialize;

pub use http::{GatewayConfig, HttpGateway};
pub use offline::OfflineGateway;

/// Everything the gateway is told about a delegated line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayRequest {
    /// The submitted line, unmodified.
    pub line: String,
    /// First command name in the line that no builtin implements.
    pub command: String,
    /// Working directory at submission.
    pub cwd: String,
    /// Filesystem tree without file contents.
    pub snapshot: NodeSnapshot,
}

/// Gateway failures. Each is shown to the user as one error line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Transport(String),
    #[error("gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("gateway returned an empty response")]
    EmptyResponse,
}

/// Something that can answer a delegated command line.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn ask(&self, request: &GatewayRequest) -> Result<String, GatewayError>;
}

/// Drop markdown fence lines (```` ``` ````, ```` ```bash ````) and trim
/// blank lines at either end.
pub fn strip_code_fences(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect();
    kept.join("\n").trim_matches('\n').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain output", "plain output")]
    #[case("```\nls: cannot access\n```", "ls: cannot access")]
    #[case("```bash\nline one\nline two\n```\n", "line one\nline two")]
    #[case("\n\n  indented\n", "  indented")]
    #[case("```", "")]
    fn test_strip_code_fences(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_code_fences(input), expected);
    }
}
