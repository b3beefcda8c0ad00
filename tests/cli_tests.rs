//! End-to-end tests that run the compiled binary and check its report

use std::process::Command;

fn run_binary(args: &[&str]) -> std::process::Output {
    let mut full_args = vec!["run", "--quiet", "--"];
    full_args.extend_from_slice(args);
    Command::new("cargo")
        .args(&full_args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to execute signal_timing binary")
}

#[test]
fn test_default_analysis_report() {
    let output = run_binary(&[]);
    assert!(
        output.status.success(),
        "binary failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Optimal Green Times:"), "stdout: {}", stdout);
    assert!(
        stdout.contains("Total System Delay:"),
        "missing delay line. stdout: {}",
        stdout
    );
    assert!(stdout.contains("Equal Split Comparison:"), "stdout: {}", stdout);
    assert!(stdout.contains("Traffic Analysis:"), "stdout: {}", stdout);
    assert!(stdout.contains("Queue Simulation"), "stdout: {}", stdout);
}

#[test]
fn test_sweep_reports_best_cycle() {
    let output = run_binary(&["--sweep"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sensitivity Analysis:"), "stdout: {}", stdout);
    assert!(stdout.contains("Best cycle length:"), "stdout: {}", stdout);
    // Every sweep cycle length gets a line
    for cycle in ["60s", "75s", "90s", "105s", "120s"] {
        assert!(
            stdout.contains(&format!("Cycle {}", cycle)),
            "missing cycle {} line. stdout: {}",
            cycle,
            stdout
        );
    }
}

#[test]
fn test_oversaturated_demand_reported_cleanly() {
    // Combined demand ratio above 1.0: infeasible at any cycle length
    let output = run_binary(&[
        "--arrival1",
        "0.3",
        "--arrival2",
        "0.2",
        "--saturation1",
        "0.5",
        "--saturation2",
        "0.45",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("No stable green split exists"),
        "stdout: {}",
        stdout
    );
    assert!(
        !stdout.contains("Optimal Green Times"),
        "no timing should be recommended. stdout: {}",
        stdout
    );
    assert!(!stdout.contains(": inf"), "raw infinity leaked: {}", stdout);
}

#[test]
fn test_invalid_parameters_fail_fast() {
    let output = run_binary(&["--arrival1", "0"]);
    assert!(
        !output.status.success(),
        "zero arrival rate must be rejected"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid configuration"),
        "stderr: {}",
        stderr
    );
}
