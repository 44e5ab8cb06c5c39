//! Fixtures for integration tests

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const INPUT_TEXT: &str = "The quick brown fox\njumps over the lazy dog.\n";

/// Script bodies for a correct implementation of every lab
pub const HELLO: &str = r#"printf 'Hello, world!\n'"#;
pub const SUM: &str = r#"a=5; b=7
if [ $# -ge 2 ]; then a=$1; b=$2; fi
printf '%s + %s = %s\n' "$a" "$b" "$((a + b))""#;
pub const FACTORIAL: &str = r#"echo "Result: 120""#;
pub const ARRAY_MAX: &str = r#"echo "Maximum value: 93""#;
pub const STRING_OPS: &str = r#"echo "String: Hello, Assembly!"
echo "Length: 16"
echo "Comparing 'abc' with 'abc': Equal"
echo "Comparing 'abc' with 'abd': Not equal""#;
pub const FILE_COPY: &str = r#"cp input.txt output.txt || exit 1
n=$(wc -c < input.txt)
echo "Success! Bytes copied: $((n))""#;

/// Write an executable-looking lab binary without the executable bit
///
/// Lab build steps do not always set it; the runner has to.
pub fn write_lab_binary(root: &Path, lab_dir: &str, binary: &str, body: &str) -> PathBuf {
    let dir = root.join(lab_dir);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(binary);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
    path
}

/// A labs tree where every lab behaves correctly
pub fn create_labs_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_lab_binary(root, "00_hello_x86_64", "hello", HELLO);
    write_lab_binary(root, "01_stack_and_calls_x86_64", "sum_program", SUM);
    write_lab_binary(root, "02_control_flow_x86_64", "factorial", FACTORIAL);
    write_lab_binary(root, "03_arrays_x86_64", "array_max", ARRAY_MAX);
    write_lab_binary(root, "04_strings_x86_64", "string_ops", STRING_OPS);
    write_lab_binary(root, "05_file_io_x86_64", "file_copy", FILE_COPY);
    fs::write(root.join("05_file_io_x86_64").join("input.txt"), INPUT_TEXT).unwrap();

    temp_dir
}
