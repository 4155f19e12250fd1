use crate::{run_with_stdin, sample_log, stderr, stdout, tracenav};

#[test]
fn test_summary_from_file() {
    let output = tracenav()
        .arg("summary")
        .arg(sample_log())
        .output()
        .expect("Failed to run tracenav");

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("TRACE SUMMARY"), "Should have header");
    assert!(stdout.contains("Entries:          6"), "{stdout}");
    assert!(stdout.contains("torch.matmul"), "Should list targets");
    assert!(stdout.contains("model.py"), "Should list files");
}

#[test]
fn test_summary_from_stdin() {
    let log = std::fs::read_to_string(sample_log()).unwrap();
    let mut cmd = tracenav();
    cmd.args(["summary", "-"]);
    let output = run_with_stdin(cmd, &log);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Entries:          6"));
}

#[test]
fn test_summary_missing_file() {
    let output = tracenav()
        .args(["summary", "/nonexistent/path/to/trace.log"])
        .output()
        .expect("Failed to run tracenav");

    assert!(!output.status.success(), "Should fail with non-existent file");
    assert!(
        stderr(&output).contains("Failed to read /nonexistent/path/to/trace.log"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn test_summary_empty_input() {
    let mut cmd = tracenav();
    cmd.args(["summary", "-"]);
    let output = run_with_stdin(cmd, "not a log line\n");

    assert!(!output.status.success(), "Empty trace is an error");
    let stderr = stderr(&output);
    assert!(stderr.contains("no trace entries found in stdin"), "{stderr}");
    assert!(stderr.contains("eager_dispatch"), "Should hint at the format");
}
