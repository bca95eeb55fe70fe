//! deskshell REPL — a terminal window onto the desktop shell.
//!
//! This REPL drives one kernel session from a real terminal.
//! It handles:
//! - Meta-commands: `/help`, `/quit`, `/cwd`, `/open`, `/windows`, `/snapshot`, `/copy`, `/clipboard`
//! - Command submission and gateway delegation via the Session
//! - Tab completion backed by the kernel's completion rules
//! - Command history via rustyline

pub mod format;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tokio::runtime::Runtime;

use deskshell_kernel::session::complete_line;
use deskshell_kernel::tools::ToolRegistry;
use deskshell_kernel::{InMemoryWindows, Kernel, KernelConfig, Session, Turn, VfsEngine, VfsPath, WindowManager};

use format::{OutputContext, detect_context, format_entries, format_prompt};

/// Returned by [`Repl::process_line`] when the user asked to leave.
pub const EXIT_SENTINEL: &str = "__REPL_EXIT__";

/// Clears the terminal and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Result from meta-command handling.
#[derive(Debug)]
enum MetaResult {
    /// Continue with optional output
    Continue(Option<String>),
    /// Exit the REPL (caller should save history and exit)
    Exit,
}

/// REPL configuration and state.
pub struct Repl {
    kernel: Kernel,
    session: Session,
    windows: Arc<InMemoryWindows>,
    runtime: Runtime,
    context: OutputContext,
}

impl Repl {
    /// Create a REPL from the user's config file.
    pub fn new() -> Result<Self> {
        let config = deskshell_kernel::config::load_kernel_config()?;
        Self::with_config(config)
    }

    /// Default tree, offline gateway, no config file.
    pub fn transient() -> Result<Self> {
        Self::with_config(KernelConfig::transient())
    }

    /// Create a new REPL with a custom kernel configuration.
    pub fn with_config(config: KernelConfig) -> Result<Self> {
        let windows = Arc::new(InMemoryWindows::new());
        windows.open("terminal", "Terminal");
        let shared: Arc<dyn WindowManager> = windows.clone();
        let kernel = Kernel::new(config).context("Failed to create kernel")?.with_windows(shared);
        let session = kernel.open_session();

        // Create tokio runtime for the gateway
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;

        Ok(Self {
            kernel,
            session,
            windows,
            runtime,
            context: detect_context(),
        })
    }

    /// Force an output context instead of detecting it.
    pub fn with_context(mut self, context: OutputContext) -> Self {
        self.context = context;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn prompt(&self) -> String {
        format_prompt(&self.session.prompt(), self.context)
    }

    /// Process a single line of input.
    ///
    /// Returns Ok(None) when nothing is shown, Ok(Some(text)) for output to
    /// display, or an error whose message is [`EXIT_SENTINEL`] when the
    /// REPL should exit.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
        let trimmed = line.trim();

        if trimmed.starts_with('/') {
            return match self.handle_meta_command(trimmed) {
                MetaResult::Continue(output) => Ok(output),
                MetaResult::Exit => Err(anyhow::anyhow!(EXIT_SENTINEL)),
            };
        }

        if matches!(trimmed, "exit" | "quit" | "logout") {
            return Err(anyhow::anyhow!(EXIT_SENTINEL));
        }

        if trimmed.is_empty() {
            return Ok(None);
        }

        let before = self.session.log().len();
        let turn = self.session.submit(line)?;
        match turn {
            Turn::Cleared => {
                return Ok(match self.context {
                    OutputContext::Interactive => Some(CLEAR_SCREEN.to_string()),
                    OutputContext::Piped => None,
                });
            }
            Turn::Delegated(pending) => {
                let answer = self.runtime.block_on(pending.ask());
                self.session.finish_delegation(answer);
            }
            Turn::Rendered => {}
        }

        let log = self.session.log();
        Ok(format_entries(&log[before.min(log.len())..], self.context))
    }

    /// Record a Ctrl-C against the session.
    pub fn interrupt(&mut self) {
        self.session.interrupt();
    }

    /// Handle a meta-command (starts with /).
    fn handle_meta_command(&mut self, cmd: &str) -> MetaResult {
        let (command, rest) = match cmd.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (cmd, ""),
        };

        match command {
            "/quit" | "/q" | "/exit" => MetaResult::Exit,
            "/help" | "/h" | "/?" => MetaResult::Continue(Some(HELP_TEXT.to_string())),
            "/cwd" => MetaResult::Continue(Some(self.session.cwd().to_string())),
            "/open" => {
                let mut words = rest.split_whitespace();
                let Some(app) = words.next() else {
                    return MetaResult::Continue(Some("Usage: /open <app> [title]".to_string()));
                };
                let title: Vec<&str> = words.collect();
                let title = if title.is_empty() { app.to_string() } else { title.join(" ") };
                let id = self.windows.open(app, &title);
                MetaResult::Continue(Some(format!("opened {}", id)))
            }
            "/windows" => {
                let windows = self.windows.windows();
                if windows.is_empty() {
                    return MetaResult::Continue(Some("(no open windows)".to_string()));
                }
                let lines: Vec<String> = windows
                    .iter()
                    .map(|w| format!("{}  {}  {}", w.id, w.app, w.title))
                    .collect();
                MetaResult::Continue(Some(lines.join("\n")))
            }
            "/snapshot" => {
                let output = self
                    .kernel
                    .vfs()
                    .export()
                    .map_err(anyhow::Error::from)
                    .and_then(|tree| serde_json::to_string_pretty(&tree).map_err(anyhow::Error::from));
                match output {
                    Ok(json) => MetaResult::Continue(Some(json)),
                    Err(e) => MetaResult::Continue(Some(format!("Snapshot failed: {}", e))),
                }
            }
            "/copy" => {
                if rest.is_empty() {
                    return MetaResult::Continue(Some("Usage: /copy <text>".to_string()));
                }
                self.session.copy(rest);
                MetaResult::Continue(None)
            }
            "/clipboard" => {
                let entries: Vec<String> = self
                    .session
                    .clipboard_ring()
                    .entries()
                    .enumerate()
                    .map(|(i, text)| format!("{:>2}  {}", i, text))
                    .collect();
                if entries.is_empty() {
                    MetaResult::Continue(Some("(clipboard empty)".to_string()))
                } else {
                    MetaResult::Continue(Some(entries.join("\n")))
                }
            }
            _ => MetaResult::Continue(Some(format!(
                "Unknown command: {}\nType /help for available commands.",
                command
            ))),
        }
    }
}

const HELP_TEXT: &str = r#"deskshell REPL

Meta commands:
  /help               Show this help
  /quit               Exit (also: exit, Ctrl-D)
  /cwd                Print the working directory
  /open <app> [title] Open a window (visible to ps and kill)
  /windows            List open windows
  /snapshot           Print the filesystem as JSON
  /copy <text>        Copy text to the clipboard
  /clipboard          List recent copies

Everything else runs in the shell. Try `help` for the builtins.
Commands the shell doesn't know are answered by the gateway."#;

/// Line editor helper: tab completion through the kernel.
pub struct ShellHelper {
    tools: Arc<ToolRegistry>,
    vfs: Arc<VfsEngine>,
    cwd: VfsPath,
}

impl ShellHelper {
    pub fn new(tools: Arc<ToolRegistry>, vfs: Arc<VfsEngine>, cwd: VfsPath) -> Self {
        Self { tools, vfs, cwd }
    }

    pub fn set_cwd(&mut self, cwd: VfsPath) {
        self.cwd = cwd;
    }
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let head = &line[..pos];
        Ok(match complete_line(head, &self.tools, &self.vfs, &self.cwd) {
            Some(completed) => (0, vec![completed]),
            None => (pos, Vec::new()),
        })
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<ShellHelper, DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("Failed to create history directory: {}", e);
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Run the REPL.
pub fn run() -> Result<()> {
    let mut repl = Repl::new()?;

    println!("deskshell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type /help for commands, /quit to exit.");

    let mut rl: Editor<ShellHelper, DefaultHistory> = Editor::new().context("Failed to create editor")?;
    rl.set_helper(Some(ShellHelper::new(
        repl.kernel.tools().clone(),
        repl.kernel.vfs().clone(),
        repl.session.cwd().clone(),
    )));

    // Load history if it exists
    let history_path = directories::BaseDirs::new().map(|b| b.data_dir().join("deskshell").join("history.txt"));
    if let Some(ref path) = history_path
        && let Err(e) = rl.load_history(path)
    {
        // Only log if it's not a "file not found" error (expected on first run)
        let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
        if !is_not_found {
            tracing::warn!("Failed to load history: {}", e);
        }
    }

    println!();

    loop {
        if let Some(helper) = rl.helper_mut() {
            helper.set_cwd(repl.session.cwd().clone());
        }

        match rl.readline(&repl.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty()
                    && let Err(e) = rl.add_history_entry(line.as_str())
                {
                    tracing::warn!("Failed to add history entry: {}", e);
                }

                match repl.process_line(&line) {
                    Ok(Some(output)) if output == CLEAR_SCREEN => print!("{}", output),
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) if e.to_string() == EXIT_SENTINEL => {
                        // User requested exit - save history and break
                        save_history(&mut rl, &history_path);
                        return Ok(());
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                repl.interrupt();
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    // Save history
    save_history(&mut rl, &history_path);

    Ok(())
}

/// Run one line non-interactively. Returns true if it produced no errors.
pub fn run_once(line: &str) -> Result<bool> {
    let mut repl = Repl::new()?.with_context(OutputContext::Piped);
    let before = repl.session.log().len();
    match repl.process_line(line) {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(e) if e.to_string() == EXIT_SENTINEL => return Ok(true),
        Err(e) => return Err(e),
    }
    let failed = repl.session.log()[before..]
        .iter()
        .any(|e| matches!(e, deskshell_kernel::LogEntry::Error(_)));
    Ok(!failed)
}
