//! deskshell-kernel (核): the core of the desktop shell.
//!
//! This crate provides:
//!
//! - **VFS**: The in-memory filesystem tree every terminal shares
//! - **Lexer**: Tokenizes command lines using logos
//! - **Parser**: Builds a pipeline from tokens using chumsky
//! - **Tools**: Tool trait, registry, and builtin commands
//! - **Scheduler**: Pipeline execution, redirection, delegation decisions
//! - **Gateway**: Fallback for commands no builtin implements
//! - **Session**: Per-terminal state, history, completion, clipboard
//! - **Kernel**: Bootstraps the shared pieces and opens sessions
//! - **Config**: TOML config file loading

pub mod ast;
pub mod config;
pub mod gateway;
pub mod help;
pub mod kernel;
pub mod lexer;
pub mod parser;
pub mod scheduler;
pub mod session;
pub mod tools;
pub mod vfs;
pub mod windows;

pub use gateway::{Gateway, GatewayConfig, GatewayError, GatewayRequest, HttpGateway, OfflineGateway};
pub use kernel::{Kernel, KernelConfig};
pub use session::{LogEntry, PendingDelegation, Session, SessionError, Turn, TurnState};
pub use vfs::{VfsEngine, VfsError, VfsPath};
pub use windows::{InMemoryWindows, WindowManager};

pub use deskshell_types::{ExecResult, NodeSnapshot, WindowInfo};
