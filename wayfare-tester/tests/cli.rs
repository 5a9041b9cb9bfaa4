use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "wayfare-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_wayfare-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("submission-failure"));
}

#[test]
fn cli_runs_logic_scenarios_to_json() {
    let exe = env!("CARGO_BIN_EXE_wayfare-tester");
    let output_path = temp_path("logic");
    let status = Command::new(exe)
        .args([
            "--scenarios",
            "all",
            "--seeds",
            "3,4",
            "--iterations",
            "2",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_path).expect("read output"))
            .expect("json report");
    let runs = report.as_array().expect("array");
    assert_eq!(runs.len(), 22);
    assert!(runs.iter().all(|run| run["passed"] == true));
}

#[test]
fn cli_rejects_malformed_seeds() {
    let exe = env!("CARGO_BIN_EXE_wayfare-tester");
    let output = Command::new(exe)
        .args(["--seeds", "1,abc"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed"));
}

#[test]
fn cli_runs_with_unknown_browser_and_json_report() {
    let exe = env!("CARGO_BIN_EXE_wayfare-tester");
    let output_path = temp_path("browser");
    let output = Command::new(exe)
        .args([
            "--mode",
            "browser",
            "--browsers",
            "unknown",
            "--report",
            "json",
            "--scenarios",
            "smoke",
            "--seeds",
            "1",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Wayfare Automated Tester"));
    assert!(stderr.contains("Unknown browser"));
    let report = std::fs::read_to_string(output_path).expect("read output");
    assert_eq!(report.trim(), "[]");
}
