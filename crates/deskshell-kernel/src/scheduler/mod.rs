//! Scheduler module for deskshell: runs one parsed pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     PipelineRunner                       │
//! │  resolve every name ──▶ any unknown? ──▶ Delegate(line)  │
//! │          │                                               │
//! │  ┌──────▼──┐  out   ┌─────────┐  out   ┌─────────┐       │
//! │  │ cmd1    │───────▶│ cmd2    │───────▶│ cmd3    │──▶ redirect / log
//! │  └─────────┘ stdin  └─────────┘ stdin  └─────────┘       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Segments run one after another on the caller's thread. Error text never
//! enters a pipe; it is collected and shown after the pipeline finishes.

mod pipeline;

pub use pipeline::{PipelineOutcome, PipelineRunner, build_tool_args};
