use crate::{sample_log, stderr, stdout, tracenav};

#[test]
fn test_show_defaults_to_first_entry_innermost() {
    let output = tracenav()
        .arg("show")
        .arg(sample_log())
        .output()
        .expect("Failed to run tracenav");

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.starts_with("Entry 1/6  torch.randn"), "{stdout}");
    assert!(stdout.contains(">   1  main  main.py:7"), "{stdout}");
    assert!(stdout.contains("Source: main.py"), "{stdout}");
}

#[test]
fn test_show_entry_and_zoom() {
    let output = tracenav()
        .arg("show")
        .arg(sample_log())
        .args(["--entry", "2", "--zoom", "1"])
        .output()
        .expect("Failed to run tracenav");

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Entry 2/6"), "{stdout}");
    assert!(stdout.contains(">   1  main  main.py:8"), "{stdout}");
    assert!(stdout.contains("\n    2  __call__  model.py:5"), "{stdout}");
}

#[test]
fn test_show_clamps_out_of_range() {
    let output = tracenav()
        .arg("show")
        .arg(sample_log())
        .args(["-e", "99", "-z", "99"])
        .output()
        .expect("Failed to run tracenav");

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Entry 6/6"), "{stdout}");
    assert!(stdout.contains(">   1  main  main.py:9"), "{stdout}");
}
