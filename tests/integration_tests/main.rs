//! Integration tests for the tracenav binary.

mod config;
mod dump;
mod show;
mod step;
mod summary;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub fn sample_log() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src/trace/testdata/sample.log")
}

/// A command isolated from the user's config file.
pub fn tracenav() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tracenav"));
    cmd.env(
        "TRACENAV_CONFIG_PATH",
        std::env::temp_dir().join("tracenav-tests-nonexistent/config.toml"),
    );
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Run `cmd` with `input` written to its stdin.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tracenav");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");

    child.wait_with_output().expect("Failed to read output")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
