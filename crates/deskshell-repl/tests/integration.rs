//! Integration tests for the deskshell REPL.
//!
//! These tests run scripts through the REPL and verify what it prints.

use deskshell_repl::format::OutputContext;
use deskshell_repl::{EXIT_SENTINEL, Repl};

fn repl() -> Repl {
    Repl::transient().expect("Failed to create REPL").with_context(OutputContext::Piped)
}

/// Run each non-comment line through a fresh REPL and collect outputs.
fn run_script(script: &str) -> Vec<String> {
    let mut repl = repl();
    let mut outputs = Vec::new();
    for line in script.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match repl.process_line(trimmed) {
            Ok(Some(output)) => outputs.push(output),
            Ok(None) => {}
            Err(e) => outputs.push(format!("ERROR: {}", e)),
        }
    }
    outputs
}

/// Helper to check if output contains expected strings.
fn outputs_contain(outputs: &[String], expected: &[&str]) -> bool {
    let joined = outputs.join("\n");
    expected.iter().all(|e| joined.contains(e))
}

// ============================================================================
// Filesystem Tests
// ============================================================================

#[test]
fn fs_redirect_round_trip() {
    let outputs = run_script(
        r#"
        echo hello > f.txt
        echo world >> f.txt
        cat f.txt
    "#,
    );
    assert_eq!(outputs, vec!["hello\nworld"]);
}

#[test]
fn fs_listing_is_plain_when_piped() {
    let outputs = run_script("ls");
    assert_eq!(outputs, vec!["Desktop\nDocuments\nDownloads"]);
}

#[test]
fn fs_hidden_with_all() {
    let outputs = run_script("ls -a");
    assert!(outputs_contain(&outputs, &[".bashrc"]));
}

#[test]
fn fs_cd_and_pwd() {
    let outputs = run_script(
        r#"
        cd Documents
        pwd
        cd ..
        pwd
    "#,
    );
    assert_eq!(outputs, vec!["/home/user/Documents", "/home/user"]);
}

#[test]
fn fs_errors_are_reported() {
    let outputs = run_script("cat missing.txt");
    assert_eq!(outputs, vec!["cat: missing.txt: No such file or directory"]);
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn pipe_grep_filters() {
    let outputs = run_script(
        r#"
        echo X | grep X
        echo X | grep Y
    "#,
    );
    assert_eq!(outputs, vec!["X"]);
}

#[test]
fn pipe_syntax_error() {
    let outputs = run_script("echo 'open");
    assert!(outputs_contain(&outputs, &["deskshell: syntax error"]));
}

// ============================================================================
// Delegation Tests
// ============================================================================

#[test]
fn unknown_command_goes_to_offline_gateway() {
    let outputs = run_script("frobnicate --now");
    assert_eq!(outputs, vec!["frobnicate: command not found"]);
}

#[test]
fn unknown_command_in_pipeline_has_no_side_effects() {
    let mut repl = repl();
    let answer = repl.process_line("touch out.txt | frobnicate").expect("line");
    assert_eq!(answer.as_deref(), Some("frobnicate: command not found"));
    let listing = repl.process_line("cat out.txt").expect("line");
    assert_eq!(listing.as_deref(), Some("cat: out.txt: No such file or directory"));
}

// ============================================================================
// Meta Command Tests
// ============================================================================

#[test]
fn meta_quit() {
    let mut repl = repl();
    let err = repl.process_line("/quit").expect_err("should exit");
    assert_eq!(err.to_string(), EXIT_SENTINEL);
    let err = repl.process_line("exit").expect_err("should exit");
    assert_eq!(err.to_string(), EXIT_SENTINEL);
}

#[test]
fn meta_cwd_follows_cd() {
    let outputs = run_script(
        r#"
        cd /tmp
        /cwd
    "#,
    );
    assert_eq!(outputs, vec!["/tmp"]);
}

#[test]
fn meta_open_window_shows_in_ps_and_kill_closes_it() {
    let mut repl = repl();
    let opened = repl.process_line("/open browser Web").expect("open").expect("output");
    assert!(opened.starts_with("opened browser-"));

    let ps = repl.process_line("ps").expect("ps").expect("output");
    let row = ps.lines().find(|l| l.ends_with("browser")).expect("browser row");
    let pid = row.split_whitespace().next().expect("pid");

    assert_eq!(repl.process_line(&format!("kill {}", pid)).expect("kill"), None);
    let ps = repl.process_line("ps").expect("ps").expect("output");
    assert!(!ps.contains("browser"));
}

#[test]
fn meta_snapshot_is_json() {
    let mut repl = repl();
    let json = repl.process_line("/snapshot").expect("snapshot").expect("output");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["kind"], "directory");
}

#[test]
fn meta_copy_and_list() {
    let outputs = run_script(
        r#"
        /copy ls -la
        /copy pwd
        /clipboard
    "#,
    );
    assert_eq!(outputs, vec![" 0  pwd\n 1  ls -la"]);
}

#[test]
fn meta_unknown() {
    let outputs = run_script("/bogus");
    assert!(outputs_contain(&outputs, &["Unknown command: /bogus"]));
}

// ============================================================================
// Session Tests
// ============================================================================

#[test]
fn clear_prints_nothing_when_piped() {
    let outputs = run_script(
        r#"
        echo before
        clear
    "#,
    );
    assert_eq!(outputs, vec!["before"]);
}

#[test]
fn history_builtin_lists_lines() {
    let outputs = run_script(
        r#"
        echo one
        history
    "#,
    );
    assert_eq!(outputs, vec!["one", "    1  echo one\n    2  history"]);
}

#[test]
fn prompt_is_plain_when_piped() {
    let mut repl = repl();
    assert_eq!(repl.prompt(), "user@deskshell:~$ ");
    let _ = repl.process_line("cd Documents");
    assert_eq!(repl.prompt(), "user@deskshell:~/Documents$ ");
}
