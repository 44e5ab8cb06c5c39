//! The `labcheck` binary, driven through the runner itself

use std::path::Path;

use labcheck::runner::{execute, ExecutionRequest, ExecutionResult};
use tempfile::TempDir;

use super::helpers::{create_labs_tree, write_lab_binary};

fn labcheck(args: &[&str], cwd: &Path) -> ExecutionResult {
    let request = ExecutionRequest::new(env!("CARGO_BIN_EXE_labcheck"))
        .args(args.iter().copied())
        .working_dir(cwd)
        .ensure_executable(false);
    execute(&request).expect("labcheck should run to completion")
}

#[test]
fn test_run_forwards_output_and_exit_code() {
    let labs = create_labs_tree();
    let hello = labs.path().join("00_hello_x86_64").join("hello");

    let result = labcheck(&["run", hello.to_str().unwrap()], labs.path());

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "Hello, world!\n");
    assert_eq!(result.stderr, "");
}

#[test]
fn test_run_forwards_stderr_and_failure_code() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_lab_binary(temp_dir.path(), "lab", "fail", "echo oops >&2; exit 3");

    let result = labcheck(&["run", script.to_str().unwrap()], temp_dir.path());

    assert_eq!(result.exit_code, 3);
    assert_eq!(result.stdout, "");
    assert_eq!(result.stderr, "oops\n");
}

#[test]
fn test_run_passes_arguments() {
    let labs = create_labs_tree();
    let sum = labs
        .path()
        .join("01_stack_and_calls_x86_64")
        .join("sum_program");

    let result = labcheck(&["run", sum.to_str().unwrap(), "-5", "10"], labs.path());

    assert_eq!(result.exit_code, 0);
    assert!(result.stdout.contains("-5 + 10 = 5"));
}

#[test]
fn test_run_missing_binary_reports_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = labcheck(&["run", "does-not-exist"], temp_dir.path());

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("Error: Binary not found"));
}

#[test]
fn test_run_timeout_flag() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_lab_binary(temp_dir.path(), "lab", "hang", "exec sleep 30");

    let result = labcheck(
        &["run", "--timeout", "1", script.to_str().unwrap()],
        temp_dir.path(),
    );

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("timed out"));
}

#[test]
fn test_verify_all_labs() {
    let labs = create_labs_tree();
    let root = labs.path().to_str().unwrap();

    let result = labcheck(&["verify", "--labs-root", root], labs.path());

    assert_eq!(result.exit_code, 0, "stdout: {}", result.stdout);
    assert!(result.stdout.contains("All 30 cases passed"));
}

#[test]
fn test_verify_json_report() {
    let labs = create_labs_tree();
    let root = labs.path().to_str().unwrap();

    let result = labcheck(
        &["verify", "--labs-root", root, "--lab", "01", "--json"],
        labs.path(),
    );

    assert_eq!(result.exit_code, 0);
    let report: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    let suites = report.as_array().unwrap();
    assert_eq!(suites.len(), 1);
    assert_eq!(suites[0]["result"], "all_passed");
    assert_eq!(suites[0]["lab"], "01");
    assert_eq!(suites[0]["outcomes"].as_array().unwrap().len(), 5);
}

#[test]
fn test_verify_reports_failures() {
    let labs = create_labs_tree();
    write_lab_binary(labs.path(), "00_hello_x86_64", "hello", "echo Goodbye");
    let root = labs.path().to_str().unwrap();

    let result = labcheck(&["verify", "--labs-root", root, "-l", "00"], labs.path());

    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("hello_output"));
    assert!(result.stdout.contains("Hello, world!"));
}

#[test]
fn test_verify_uses_config_file() {
    let labs = create_labs_tree();
    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("labcheck.toml");
    std::fs::write(
        &config,
        format!("labs_root = {:?}\nparallel = true\n", labs.path().to_str().unwrap()),
    )
    .unwrap();

    let result = labcheck(
        &["--config", config.to_str().unwrap(), "verify", "--lab", "00"],
        config_dir.path(),
    );

    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
}

#[test]
fn test_list_shows_catalog() {
    let labs = create_labs_tree();
    let root = labs.path().to_str().unwrap();

    let result = labcheck(&["list", "--labs-root", root, "--verbose"], labs.path());

    assert_eq!(result.exit_code, 0);
    for binary in ["hello", "sum_program", "factorial", "array_max", "string_ops", "file_copy"] {
        assert!(result.stdout.contains(binary), "missing {binary}");
    }
    assert!(result.stdout.contains("custom_values"));
}
