//! Session lifecycle across the kernel: sharing, busy state, interrupts.

use deskshell_kernel::session::{LogEntry, Turn, TurnState};
use deskshell_kernel::{Kernel, KernelConfig, SessionError, VfsPath};

#[test]
fn sessions_share_tree_but_not_cwd() {
    let kernel = Kernel::transient().expect("kernel");
    let mut left = kernel.open_session();
    let mut right = kernel.open_session();

    assert!(left.submit("cd /tmp").is_ok());
    assert!(left.submit("echo from-left > note.txt").is_ok());

    assert_eq!(right.cwd().to_string(), "/home/user");
    assert!(right.submit("cat /tmp/note.txt").is_ok());
    assert_eq!(right.log().last(), Some(&LogEntry::Output("from-left".into())));
}

#[tokio::test]
async fn submit_while_delegated_is_rejected_and_late_answer_lands() {
    let kernel = Kernel::transient().expect("kernel");
    let mut session = kernel.open_session();

    let Ok(Turn::Delegated(pending)) = session.submit("neofetch") else {
        panic!("expected delegation");
    };
    assert_eq!(session.state(), TurnState::Delegated);
    assert_eq!(pending.request().line, "neofetch");

    assert_eq!(session.submit("ls").err(), Some(SessionError::Busy));

    session.set_input("half typed");
    session.interrupt();
    assert_eq!(session.input(), "");
    assert!(session.is_processing());

    let answer = pending.ask().await;
    session.finish_delegation(answer);
    assert_eq!(session.state(), TurnState::Idle);
    assert_eq!(
        session.log().last(),
        Some(&LogEntry::Delegated("neofetch: command not found".into()))
    );
}

#[test]
fn blank_line_echoes_prompt_only() {
    let kernel = Kernel::transient().expect("kernel");
    let mut session = kernel.open_session();
    assert!(matches!(session.submit("   "), Ok(Turn::Rendered)));
    assert_eq!(session.log().len(), 1);
    assert!(session.history().entries().is_empty());
}

#[test]
fn builtin_errors_and_output_both_logged() {
    let kernel = Kernel::transient().expect("kernel");
    let mut session = kernel.open_session();
    assert!(session.submit("cat Documents/readme.txt missing").is_ok());
    let log = session.log();
    assert!(matches!(&log[1], LogEntry::Output(text) if text.starts_with("Welcome")));
    assert_eq!(log[2], LogEntry::Error("cat: missing: No such file or directory".into()));
}

#[test]
fn custom_home_is_tilde_in_prompt() {
    let kernel = Kernel::new(
        KernelConfig::default()
            .with_user("ada")
            .with_home("/home/ada/Desktop"),
    )
    .expect("kernel");
    let mut session = kernel.open_session();
    assert_eq!(session.cwd(), &VfsPath::parse("/home/ada/Desktop"));
    assert_eq!(session.prompt(), "ada@deskshell:~$ ");
    assert!(session.submit("cd ..").is_ok());
    assert_eq!(session.prompt(), "ada@deskshell:/home/ada$ ");
}

#[test]
fn copy_then_paste_into_input() {
    let kernel = Kernel::transient().expect("kernel");
    let mut session = kernel.open_session();
    assert_eq!(session.paste(), None);
    session.copy("pwd");
    assert_eq!(session.paste().as_deref(), Some("pwd"));
    assert_eq!(session.input(), "pwd");
}
