//! Build script embedding the release version.
//!
//! `QTMODS_VERSION` is taken from the environment when packagers set it,
//! otherwise from `git describe` on the workspace, otherwise from Cargo.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-env-changed=QTMODS_VERSION");

    let version = std::env::var("QTMODS_VERSION")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(git_version)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=QTMODS_VERSION={version}");
}

fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=-dev"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let described = String::from_utf8(output.stdout).ok()?;
    Some(described.trim().trim_start_matches('v').to_string())
}
