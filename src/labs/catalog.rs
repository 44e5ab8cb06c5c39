//! Built-in verification cases, one suite per lab

use super::case::{LabCase, LabSuite, Prepare};
use super::expect::Expectation::{self, ExitCode, StdoutEndsWith};

const INPUT_FILE: &str = "input.txt";
const OUTPUT_FILE: &str = "output.txt";

/// All known lab suites, ordered by lab number
pub fn catalog() -> Vec<LabSuite> {
    vec![
        hello(),
        stack_and_calls(),
        control_flow(),
        arrays(),
        strings(),
        file_io(),
    ]
}

/// Look a suite up by id (`"03"`) or directory (`"03_arrays_x86_64"`)
pub fn find_suite(selector: &str) -> Option<LabSuite> {
    catalog().into_iter().find(|suite| suite.matches(selector))
}

fn newline() -> Expectation {
    StdoutEndsWith("\n".to_string())
}

fn hello() -> LabSuite {
    LabSuite::new("00", "00_hello_x86_64", "hello", "Hello World")
        .case(
            LabCase::new("hello_output")
                .expect(ExitCode(0))
                .expect(Expectation::contains("Hello, world!")),
        )
        .case(LabCase::new("hello_exit_code").expect(ExitCode(0)))
        .case(LabCase::new("hello_newline").expect(newline()))
}

fn sum_case(name: &str, args: &[&str], line: &str) -> LabCase {
    LabCase::new(name)
        .args(args)
        .expect(ExitCode(0))
        .expect(Expectation::contains(line))
}

fn stack_and_calls() -> LabSuite {
    LabSuite::new(
        "01",
        "01_stack_and_calls_x86_64",
        "sum_program",
        "Stack and Function Calls",
    )
    .case(sum_case("default_sum", &[], "5 + 7 = 12"))
    .case(sum_case("custom_values", &["10", "20"], "10 + 20 = 30"))
    .case(sum_case("negative_numbers", &["-5", "10"], "-5 + 10 = 5"))
    .case(sum_case("zero", &["0", "0"], "0 + 0 = 0"))
    .case(sum_case("large_numbers", &["1000", "2000"], "1000 + 2000 = 3000"))
}

fn control_flow() -> LabSuite {
    LabSuite::new(
        "02",
        "02_control_flow_x86_64",
        "factorial",
        "Control Flow and Loops",
    )
    .case(LabCase::new("factorial_runs").expect(ExitCode(0)))
    .case(LabCase::new("factorial_output").expect(Expectation::contains("120")))
    .case(LabCase::new("factorial_result_message").expect(Expectation::contains("Result:")))
    .case(LabCase::new("factorial_newline").expect(newline()))
    .case(LabCase::new("factorial_exit_code").expect(ExitCode(0)))
}

fn arrays() -> LabSuite {
    LabSuite::new("03", "03_arrays_x86_64", "array_max", "Working with Arrays")
        .case(LabCase::new("array_max_runs").expect(ExitCode(0)))
        // 42, 17, 93, 8, 56, 31, 74, 19, 65, 28
        .case(LabCase::new("array_max_output").expect(Expectation::contains("93")))
        .case(
            LabCase::new("array_max_message")
                .expect(Expectation::contains_any(&["Maximum", "maximum"])),
        )
        .case(LabCase::new("array_max_newline").expect(newline()))
        .case(LabCase::new("array_max_exit_code").expect(ExitCode(0)))
}

fn strings() -> LabSuite {
    LabSuite::new("04", "04_strings_x86_64", "string_ops", "String Operations")
        .case(LabCase::new("string_ops_runs").expect(ExitCode(0)))
        // "Hello, Assembly!" is 16 characters
        .case(
            LabCase::new("strlen_output")
                .expect(Expectation::contains("16"))
                .expect(Expectation::contains_any(&["Length", "length"])),
        )
        .case(LabCase::new("strcmp_equal").expect(Expectation::contains_any(&["Equal", "equal"])))
        .case(
            LabCase::new("strcmp_not_equal")
                .expect(Expectation::contains_any(&["Not equal", "not equal", "different"])),
        )
        .case(
            LabCase::new("output_format")
                .expect(Expectation::contains_any(&["Comparing", "comparing"])),
        )
        .case(LabCase::new("exit_code").expect(ExitCode(0)))
}

fn file_io() -> LabSuite {
    let fresh = |name: &str| LabCase::new(name).prepare(Prepare::RemoveFile(OUTPUT_FILE.into()));

    LabSuite::new("05", "05_file_io_x86_64", "file_copy", "File I/O")
        .case(LabCase::new("file_copy_runs").expect(ExitCode(0)))
        .case(fresh("output_file_created").expect(Expectation::FileExists(OUTPUT_FILE.into())))
        .case(fresh("file_content_copied").expect(Expectation::FilesEqual {
            produced: OUTPUT_FILE.into(),
            reference: INPUT_FILE.into(),
        }))
        .case(
            LabCase::new("success_message")
                .expect(Expectation::StdoutContainsIgnoreCase("success".into())),
        )
        .case(
            LabCase::new("bytes_counted")
                .expect(Expectation::contains_any(&["Bytes", "bytes"]))
                .expect(Expectation::StdoutContainsFileSize(INPUT_FILE.into())),
        )
        .case(LabCase::new("exit_code").expect(ExitCode(0)))
}
