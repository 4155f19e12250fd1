use serde_json::Value;

use crate::{run_with_stdin, sample_log, stderr, tracenav};

#[test]
fn test_dump_is_json() {
    let output = tracenav()
        .arg("dump")
        .arg(sample_log())
        .output()
        .expect("Failed to run tracenav");

    assert!(output.status.success(), "{}", stderr(&output));
    let trace: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(trace["entries"].as_array().unwrap().len(), 6);
    assert_eq!(trace["strtable"]["0"], "main.py");
    assert_eq!(trace["strtable"]["1"], "model.py");
    assert_eq!(trace["entries"][1]["target"], "torch.matmul");
    assert_eq!(trace["entries"][1]["stack"][2]["name"], "__call__");
    assert!(
        trace["sourcemap"]["1"]
            .as_str()
            .unwrap()
            .starts_with("import torch")
    );
}

#[test]
fn test_dump_empty_trace() {
    let mut cmd = tracenav();
    cmd.args(["dump", "-"]);
    let output = run_with_stdin(cmd, "");

    assert!(output.status.success(), "Empty dump is not an error");
    let trace: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(trace["entries"], serde_json::json!([]));
}
