//! deskshell CLI entry point.
//!
//! Usage:
//!   deskshell                  # Interactive REPL
//!   deskshell -c <command>     # Execute command and exit

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        None => {
            deskshell_repl::run()?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!(
                "deskshell {} ({} {})",
                env!("CARGO_PKG_VERSION"),
                env!("DESKSHELL_GIT_HASH"),
                env!("DESKSHELL_BUILD_DATE")
            );
            Ok(ExitCode::SUCCESS)
        }

        Some("-c") => {
            let cmd = args.get(2).context("-c requires a command argument")?;
            if deskshell_repl::run_once(cmd)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }

        Some(unknown) => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'deskshell --help' for usage.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_help() {
    println!(
        r#"deskshell v{}

Usage:
  deskshell                    Interactive REPL
  deskshell -c <command>       Execute command line and exit

Options:
  -c <command>                 Execute command line and exit
  -h, --help                   Show this help
  -V, --version                Show version

Configuration:
  ~/.config/deskshell/config.toml   user, hostname, seed tree, [gateway]
  DESKSHELL_API_KEY                 bearer token for the gateway
  RUST_LOG                          log filter, e.g. deskshell_kernel=debug

Examples:
  deskshell -c 'ls -la'
  deskshell -c 'echo hello > note.txt'
  deskshell -c 'cat Documents/readme.txt | grep Welcome'
"#,
        env!("CARGO_PKG_VERSION")
    );
}
