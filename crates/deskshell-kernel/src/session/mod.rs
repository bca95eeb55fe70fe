//! One terminal's worth of shell state.
//!
//! A [`Session`] owns everything a single terminal window shows: working
//! directory, history, input line, clipboard ring and the visible log. It
//! shares the filesystem, tools and collaborators with every other session
//! of the same kernel.
//!
//! # Turn lifecycle
//!
//! ```text
//! Idle ─submit─▶ Submitted ─▶ Processing ─┬─▶ Rendered ─▶ Idle
//!                                         ├─▶ Cleared  ─▶ Idle
//!                                         └─▶ Delegated ─finish_delegation─▶ Idle
//! ```
//!
//! Local commands settle inside [`Session::submit`]. A delegated line hands
//! back a [`PendingDelegation`] for the caller to await; the session stays
//! busy until [`Session::finish_delegation`] records the answer, and rejects
//! new submissions meanwhile.

mod clipboard;
mod completion;
mod history;

use std::sync::Arc;

use crate::gateway::{Gateway, GatewayError, GatewayRequest, strip_code_fences};
use crate::parser::parse;
use crate::scheduler::{PipelineOutcome, PipelineRunner};
use crate::tools::{ExecContext, SystemInfo, ToolRegistry};
use crate::vfs::{VfsEngine, VfsPath};
use crate::windows::WindowManager;

pub use clipboard::{Clipboard, ClipboardRing, MemoryClipboard, RING_CAPACITY};
pub use completion::complete_line;
pub use history::{History, Recall};

/// Where a session is in its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Submitted,
    Processing,
    /// Waiting on the gateway.
    Delegated,
    Rendered,
    Cleared,
}

impl TurnState {
    /// True while a submitted line hasn't settled.
    pub fn is_processing(self) -> bool {
        matches!(self, Self::Submitted | Self::Processing | Self::Delegated)
    }
}

/// A line of the visible session log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Echo of a submitted line with the prompt it was typed at.
    Command { prompt: String, line: String },
    /// Builtin output. May contain display markup.
    Output(String),
    /// Error text.
    Error(String),
    /// Input discarded with Ctrl-C.
    Interrupted { prompt: String, line: String },
    /// Text returned by the gateway, fences stripped.
    Delegated(String),
}

/// How a submission settled.
pub enum Turn {
    Rendered,
    Cleared,
    /// The line went to the gateway; await it and pass the answer to
    /// [`Session::finish_delegation`].
    Delegated(PendingDelegation),
}

/// An unanswered gateway request. Holds no borrow of the session, so the
/// caller can keep handling input (Ctrl-C) while it runs.
pub struct PendingDelegation {
    request: GatewayRequest,
    gateway: Arc<dyn Gateway>,
}

impl PendingDelegation {
    pub fn request(&self) -> &GatewayRequest {
        &self.request
    }

    pub async fn ask(&self) -> Result<String, GatewayError> {
        self.gateway.ask(&self.request).await
    }
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a command is still running")]
    Busy,
}

/// The pieces every session of a kernel shares.
#[derive(Clone)]
pub struct SessionServices {
    pub vfs: Arc<VfsEngine>,
    pub tools: Arc<ToolRegistry>,
    pub gateway: Arc<dyn Gateway>,
    pub system: Arc<SystemInfo>,
    pub windows: Arc<dyn WindowManager>,
    pub clipboard: Arc<dyn Clipboard>,
}

/// Shell state for one terminal.
pub struct Session {
    services: SessionServices,
    runner: PipelineRunner,
    cwd: VfsPath,
    prev_cwd: Option<VfsPath>,
    history: History,
    ring: ClipboardRing,
    input: String,
    log: Vec<LogEntry>,
    state: TurnState,
}

impl Session {
    /// Open a session at the filesystem's home directory.
    pub fn new(services: SessionServices) -> Self {
        let runner = PipelineRunner::new(services.tools.clone());
        let cwd = services.vfs.home().clone();
        Self {
            services,
            runner,
            cwd,
            prev_cwd: None,
            history: History::new(),
            ring: ClipboardRing::default(),
            input: String::new(),
            log: Vec::new(),
            state: TurnState::Idle,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state.is_processing()
    }

    pub fn cwd(&self) -> &VfsPath {
        &self.cwd
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard_ring(&self) -> &ClipboardRing {
        &self.ring
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// `user@host:~/Documents$ `
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.services.vfs.identity().user,
            self.services.system.hostname,
            self.display_cwd()
        )
    }

    /// Working directory with the home prefix shown as `~`.
    pub fn display_cwd(&self) -> String {
        let home = self.services.vfs.home();
        if self.cwd == *home {
            return "~".to_string();
        }
        if self.cwd.starts_with(home) && !home.is_root() {
            let rest = &self.cwd.segments()[home.segments().len()..];
            return format!("~/{}", rest.join("/"));
        }
        self.cwd.to_string()
    }

    /// Submit the current input line.
    pub fn submit_input(&mut self) -> Result<Turn, SessionError> {
        let line = std::mem::take(&mut self.input);
        self.submit(&line)
    }

    /// Run one command line.
    ///
    /// Builtin pipelines run to completion here. A line naming any
    /// unknown command comes back as [`Turn::Delegated`] with nothing run,
    /// as does a line that fails to parse and doesn't start with a builtin.
    #[tracing::instrument(level = "info", skip(self), fields(cwd = %self.cwd))]
    pub fn submit(&mut self, line: &str) -> Result<Turn, SessionError> {
        if self.state.is_processing() {
            return Err(SessionError::Busy);
        }
        self.transition(TurnState::Submitted);
        self.input.clear();
        self.log.push(LogEntry::Command {
            prompt: self.prompt(),
            line: line.to_string(),
        });
        self.history.push(line);

        if line.trim().is_empty() {
            return Ok(self.settle(TurnState::Rendered));
        }

        self.transition(TurnState::Processing);
        let outcome = match parse(line) {
            Ok(pipeline) => {
                let mut ctx = self.exec_context();
                let outcome = self.runner.run(&pipeline, &mut ctx);
                if let PipelineOutcome::Completed(_) = &outcome {
                    self.cwd = ctx.cwd;
                    self.prev_cwd = ctx.prev_cwd;
                }
                outcome
            }
            // Free-form text the shell can't parse still belongs to the
            // gateway unless it starts with a builtin.
            Err(e) => match line.split_whitespace().next() {
                Some(first) if !self.services.tools.contains(first) => PipelineOutcome::Delegate {
                    command: first.to_string(),
                },
                _ => {
                    self.log.push(LogEntry::Error(format!("deskshell: syntax error: {}", e)));
                    return Ok(self.settle(TurnState::Rendered));
                }
            },
        };

        match outcome {
            PipelineOutcome::Completed(result) => {
                if result.clear {
                    self.log.clear();
                    return Ok(self.settle(TurnState::Cleared));
                }
                let shown = result.display_text();
                if !shown.is_empty() {
                    self.log.push(LogEntry::Output(shown.to_string()));
                }
                if !result.err.is_empty() {
                    self.log.push(LogEntry::Error(result.err));
                }
                Ok(self.settle(TurnState::Rendered))
            }
            PipelineOutcome::Delegate { command } => {
                tracing::info!(command = %command, "delegating line to gateway");
                let snapshot = match self.services.vfs.snapshot() {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        self.log.push(LogEntry::Error(format!("deskshell: {}", e)));
                        return Ok(self.settle(TurnState::Rendered));
                    }
                };
                self.transition(TurnState::Delegated);
                Ok(Turn::Delegated(PendingDelegation {
                    request: GatewayRequest {
                        line: line.to_string(),
                        command,
                        cwd: self.cwd.to_string(),
                        snapshot,
                    },
                    gateway: self.services.gateway.clone(),
                }))
            }
        }
    }

    /// Record the gateway's answer to the pending line and end the turn.
    pub fn finish_delegation(&mut self, answer: Result<String, GatewayError>) {
        match answer {
            Ok(text) => {
                let text = strip_code_fences(&text);
                if !text.is_empty() {
                    self.log.push(LogEntry::Delegated(text));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "gateway failed");
                self.log.push(LogEntry::Error(format!("deskshell: {}", e)));
            }
        }
        self.transition(TurnState::Idle);
    }

    /// Submit a line and, if delegated, wait for the gateway.
    pub async fn execute(&mut self, line: &str) -> Result<(), SessionError> {
        if let Turn::Delegated(pending) = self.submit(line)? {
            let answer = pending.ask().await;
            self.finish_delegation(answer);
        }
        Ok(())
    }

    /// Ctrl-C: log the abandoned input with a `^C` marker and clear it.
    ///
    /// An in-flight gateway request keeps running; its answer still lands.
    pub fn interrupt(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.log.push(LogEntry::Interrupted {
            prompt: self.prompt(),
            line,
        });
        self.history.reset_cursor();
    }

    /// Up arrow.
    pub fn history_previous(&mut self) {
        let recall = self.history.previous();
        self.apply_recall(recall);
    }

    /// Down arrow.
    pub fn history_next(&mut self) {
        let recall = self.history.next();
        self.apply_recall(recall);
    }

    /// Tab. Returns true if the input changed.
    pub fn complete(&mut self) -> bool {
        match complete_line(&self.input, &self.services.tools, &self.services.vfs, &self.cwd) {
            Some(line) => {
                self.input = line;
                true
            }
            None => false,
        }
    }

    /// Copy `text` to the ring and the desktop clipboard.
    pub fn copy(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ring.push(text);
        self.services.clipboard.write(text);
    }

    /// Insert the clipboard (or, failing that, the newest ring entry) at
    /// the end of the input.
    pub fn paste(&mut self) -> Option<String> {
        let text = self
            .services
            .clipboard
            .read()
            .filter(|t| !t.is_empty())
            .or_else(|| self.ring.head().map(str::to_string))?;
        self.input.push_str(&text);
        Some(text)
    }

    fn apply_recall(&mut self, recall: Recall) {
        match recall {
            Recall::Entry(line) => self.input = line,
            Recall::Blank => self.input.clear(),
            Recall::Unchanged => {}
        }
    }

    fn exec_context(&self) -> ExecContext {
        let services = &self.services;
        let mut ctx = ExecContext::new(services.vfs.clone(), services.system.clone(), services.windows.clone());
        ctx.cwd = self.cwd.clone();
        ctx.prev_cwd = self.prev_cwd.clone();
        ctx.history = self.history.entries().to_vec();
        ctx.set_tool_schemas(services.tools.schemas());
        ctx
    }

    fn transition(&mut self, next: TurnState) {
        tracing::trace!(from = ?self.state, to = ?next, "turn state");
        self.state = next;
    }

    /// Pass through a terminal state back to idle.
    fn settle(&mut self, terminal: TurnState) -> Turn {
        self.transition(terminal);
        self.transition(TurnState::Idle);
        match terminal {
            TurnState::Cleared => Turn::Cleared,
            _ => Turn::Rendered,
        }
    }
}
