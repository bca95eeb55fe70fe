//! Execution context for tools.

use std::sync::Arc;

use deskshell_types::ToolSchema;

use crate::vfs::{VfsEngine, VfsPath};
use crate::windows::WindowManager;

/// Fixed facts the system-information builtins report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub hostname: String,
    pub kernel_name: String,
    pub kernel_release: String,
    pub machine: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            hostname: "deskshell".to_string(),
            kernel_name: "Linux".to_string(),
            kernel_release: "6.1.0-desktop".to_string(),
            machine: "x86_64".to_string(),
        }
    }
}

/// Execution context passed to tools.
///
/// Built fresh by the session for each submitted line and read back
/// afterwards, so tools never hold a reference into session state.
pub struct ExecContext {
    /// The shared filesystem.
    pub vfs: Arc<VfsEngine>,
    /// Current working directory.
    pub cwd: VfsPath,
    /// Previous working directory (for `cd -`).
    pub prev_cwd: Option<VfsPath>,
    /// Piped input from the previous pipeline segment.
    pub stdin: Option<String>,
    /// Host facts for `uname`, `hostname`, `whoami`.
    pub system: Arc<SystemInfo>,
    /// Open windows, for `ps` and `kill`.
    pub windows: Arc<dyn WindowManager>,
    /// Tool schemas for the help command.
    pub tool_schemas: Vec<ToolSchema>,
    /// Submitted lines so far, oldest first (for `history`).
    pub history: Vec<String>,
}

impl ExecContext {
    /// Create a context rooted at the engine's home directory.
    pub fn new(vfs: Arc<VfsEngine>, system: Arc<SystemInfo>, windows: Arc<dyn WindowManager>) -> Self {
        let cwd = vfs.home().clone();
        Self {
            vfs,
            cwd,
            prev_cwd: None,
            stdin: None,
            system,
            windows,
            tool_schemas: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Set the available tool schemas (for help command).
    pub fn set_tool_schemas(&mut self, schemas: Vec<ToolSchema>) {
        self.tool_schemas = schemas;
    }

    /// Set stdin for this execution.
    pub fn set_stdin(&mut self, stdin: String) {
        self.stdin = Some(stdin);
    }

    /// Get stdin, consuming it.
    pub fn take_stdin(&mut self) -> Option<String> {
        self.stdin.take()
    }

    /// Current user name.
    pub fn user(&self) -> &str {
        &self.vfs.identity().user
    }

    /// Resolve a path relative to cwd, expanding a leading `~`.
    pub fn resolve_path(&self, path: &str) -> VfsPath {
        self.vfs.resolve_path(&self.cwd, path)
    }

    /// Change the current working directory.
    ///
    /// Saves the old directory for `cd -` support.
    pub fn set_cwd(&mut self, path: VfsPath) {
        self.prev_cwd = Some(std::mem::replace(&mut self.cwd, path));
    }

    /// Get the previous working directory (for `cd -`).
    pub fn get_prev_cwd(&self) -> Option<&VfsPath> {
        self.prev_cwd.as_ref()
    }
}
