//! Catalog suites against fake lab trees

use std::fs;
use std::time::Duration;

use labcheck::labs::{
    catalog, find_suite, run_suite, run_suites, CaseStatus, Expectation, LabCase, LabLayout,
    LabSuite, RunOptions,
};

use super::helpers::{create_labs_tree, write_lab_binary, INPUT_TEXT};

#[test]
fn test_all_suites_pass_against_correct_labs() {
    let labs = create_labs_tree();
    let layout = LabLayout::new(labs.path());
    let suites = catalog();

    let results = run_suites(&layout, &suites, &RunOptions::default(), false);

    assert_eq!(results.len(), suites.len());
    for result in &results {
        assert!(
            result.all_passed(),
            "lab {} failed: {:?}",
            result.lab(),
            result.failures()
        );
    }
    let total: usize = results.iter().map(|r| r.passed_count()).sum();
    assert_eq!(total, 30);
}

#[test]
fn test_parallel_run_matches_sequential_order() {
    let labs = create_labs_tree();
    let layout = LabLayout::new(labs.path());
    let suites = catalog();

    let results = run_suites(&layout, &suites, &RunOptions::default(), true);

    let labs_in_order: Vec<_> = results.iter().map(|r| r.lab().to_string()).collect();
    let expected: Vec<_> = suites.iter().map(|s| s.id.clone()).collect();
    assert_eq!(labs_in_order, expected);
    assert!(results.iter().all(|r| r.all_passed()));
}

#[test]
fn test_file_copy_output_matches_input() {
    let labs = create_labs_tree();
    let layout = LabLayout::new(labs.path());
    let suite = find_suite("05").unwrap();
    let output = labs.path().join("05_file_io_x86_64").join("output.txt");
    fs::write(&output, "stale content from an earlier run").unwrap();

    let result = run_suite(&layout, &suite, &RunOptions::default());

    assert!(result.all_passed(), "{:?}", result.failures());
    assert_eq!(fs::read(&output).unwrap(), INPUT_TEXT.as_bytes());
}

#[test]
fn test_file_copy_wrong_byte_count_fails() {
    let labs = create_labs_tree();
    write_lab_binary(
        labs.path(),
        "05_file_io_x86_64",
        "file_copy",
        r#"cp input.txt output.txt; echo "Success! Bytes copied: 9999""#,
    );
    let suite = find_suite("05").unwrap();

    let result = run_suite(&LabLayout::new(labs.path()), &suite, &RunOptions::default());

    assert!(!result.all_passed());
    let failed: Vec<_> = result
        .outcomes()
        .iter()
        .filter(|o| !o.passed())
        .map(|o| o.case.as_str())
        .collect();
    assert_eq!(failed, vec!["bytes_counted"]);
}

#[test]
fn test_broken_lab_fails_without_affecting_others() {
    let labs = create_labs_tree();
    write_lab_binary(labs.path(), "00_hello_x86_64", "hello", "echo Goodbye; exit 1");
    let layout = LabLayout::new(labs.path());

    let results = run_suites(&layout, &catalog(), &RunOptions::default(), true);

    let hello = &results[0];
    assert_eq!(hello.lab(), "00");
    assert!(!hello.all_passed());
    assert_eq!(hello.failed_count(), 2);
    assert!(hello
        .failures()
        .iter()
        .any(|f| f.contains("Hello, world!")));
    assert!(hello
        .failures()
        .iter()
        .any(|f| f.contains("expected exit code 0, got 1")));

    assert!(results[1..].iter().all(|r| r.all_passed()));
}

#[test]
fn test_missing_binary_is_reported_per_case() {
    let labs = create_labs_tree();
    fs::remove_file(labs.path().join("02_control_flow_x86_64").join("factorial")).unwrap();
    let suite = find_suite("02").unwrap();

    let result = run_suite(&LabLayout::new(labs.path()), &suite, &RunOptions::default());

    assert_eq!(result.failed_count(), suite.cases.len());
    for outcome in result.outcomes() {
        match &outcome.status {
            CaseStatus::Error { kind, message } => {
                assert_eq!(kind, "not-found");
                assert!(message.contains("factorial"));
            }
            other => panic!("expected not-found error, got {other:?}"),
        }
    }
}

#[test]
fn test_hanging_lab_times_out() {
    let labs = create_labs_tree();
    write_lab_binary(labs.path(), "03_arrays_x86_64", "array_max", "exec sleep 30");
    let mut suite = find_suite("03").unwrap();
    suite.cases.truncate(1);
    let options = RunOptions {
        timeout: Duration::from_millis(300),
        ..RunOptions::default()
    };

    let result = run_suite(&LabLayout::new(labs.path()), &suite, &options);

    match &result.outcomes()[0].status {
        CaseStatus::Error { kind, .. } => assert_eq!(kind, "timeout"),
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(result.total_duration() < Duration::from_secs(5));
}

#[test]
fn test_sum_program_argument_cases() {
    let labs = create_labs_tree();
    // Ignores its arguments, so only the default case holds.
    write_lab_binary(
        labs.path(),
        "01_stack_and_calls_x86_64",
        "sum_program",
        r#"echo "5 + 7 = 12""#,
    );
    let suite = find_suite("01").unwrap();

    let result = run_suite(&LabLayout::new(labs.path()), &suite, &RunOptions::default());

    assert_eq!(result.passed_count(), 1);
    assert!(result.outcomes()[0].passed());
    assert_eq!(result.outcomes()[0].case, "default_sum");
}

#[test]
fn test_case_stdin_reaches_lab_binary() {
    let labs = create_labs_tree();
    write_lab_binary(
        labs.path(),
        "06_echo_x86_64",
        "echo_upper",
        r#"tr 'a-z' 'A-Z'"#,
    );
    let suite = LabSuite::new("06", "06_echo_x86_64", "echo_upper", "Echo")
        .case(
            LabCase::new("uppercases_input")
                .stdin("hello lab\n")
                .expect(Expectation::ExitCode(0))
                .expect(Expectation::StdoutEquals("HELLO LAB\n".into())),
        )
        .case(
            LabCase::new("no_input")
                .expect(Expectation::StdoutEquals(String::new()))
                .expect(Expectation::StderrEmpty),
        );

    let result = run_suite(&LabLayout::new(labs.path()), &suite, &RunOptions::default());

    assert!(result.all_passed(), "{:?}", result.failures());
    assert_eq!(result.passed_count(), 2);
}
