//! Stamps `deskshell -V` with the source revision and build date.
//!
//! `DESKSHELL_GIT_HASH` is `git describe --always --dirty`, so local edits
//! show up as `abc1234-dirty`. `SOURCE_DATE_EPOCH` pins the date for
//! reproducible packaging.

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Utc};

fn main() {
    let git_dir = Path::new("../../.git");
    if git_dir.exists() {
        println!("cargo::rerun-if-changed=../../.git/HEAD");
        println!("cargo::rerun-if-changed=../../.git/index");
    }
    println!("cargo::rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let revision = git(&["describe", "--always", "--dirty"]).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=DESKSHELL_GIT_HASH={revision}");
    println!("cargo:rustc-env=DESKSHELL_BUILD_DATE={}", build_date().format("%Y-%m-%d"));
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn build_date() -> DateTime<Utc> {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}
