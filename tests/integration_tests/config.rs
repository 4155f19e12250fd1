use crate::{sample_log, stderr, stdout, tracenav};

#[test]
fn test_config_flag_hides_locals() {
    let temp = tempfile::tempdir().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "show-locals = false\ncontext-lines = 0\n").unwrap();

    let output = tracenav()
        .arg("show")
        .arg(sample_log())
        .args(["-e", "2", "-z", "1"])
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to run tracenav");

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(!stdout.contains("Locals:"), "{stdout}");
    assert!(stdout.contains("> 8 |     y = m(x)"), "{stdout}");
    assert!(!stdout.contains("x = torch.randn"), "{stdout}");
}

#[test]
fn test_config_env_var() {
    let temp = tempfile::tempdir().unwrap();
    let config = temp.path().join("viewer.toml");
    std::fs::write(&config, "show-locals = false\n").unwrap();

    let output = tracenav()
        .env("TRACENAV_CONFIG_PATH", &config)
        .arg("show")
        .arg(sample_log())
        .output()
        .expect("Failed to run tracenav");

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!stdout(&output).contains("Locals:"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "show-locals = \"sometimes\"\n").unwrap();

    let output = tracenav()
        .arg("show")
        .arg(sample_log())
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to run tracenav");

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("invalid config file"),
        "{}",
        stderr(&output)
    );
}
