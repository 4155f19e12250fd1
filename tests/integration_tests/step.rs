use crate::{run_with_stdin, sample_log, stderr, stdout, tracenav};

#[test]
fn test_step_session_from_stdin() {
    let mut cmd = tracenav();
    cmd.arg("step").arg(sample_log());
    let output = run_with_stdin(cmd, "n\nn\nq\n");

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Entry 1/6"), "{stdout}");
    assert!(stdout.contains("Entry 2/6"), "{stdout}");
    assert!(stdout.trim_end().contains("Entry 6/6  torch.Tensor.sum"), "{stdout}");
}

#[test]
fn test_step_starts_at_entry() {
    let mut cmd = tracenav();
    cmd.arg("step").arg(sample_log()).args(["--entry", "5"]);
    let output = run_with_stdin(cmd, "n\n");

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.starts_with("Entry 5/6  torch.relu"), "{stdout}");
    assert!(stdout.contains("No next step at depth 2"), "{stdout}");
}

#[test]
fn test_step_rejects_stdin_trace() {
    let mut cmd = tracenav();
    cmd.args(["step", "-"]);
    let output = run_with_stdin(cmd, "");

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("cannot read the trace from stdin"),
        "{}",
        stderr(&output)
    );
}
