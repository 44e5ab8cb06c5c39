//! Verification case definitions

use super::expect::Expectation;

/// Filesystem preparation run before a case spawns the lab binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepare {
    /// Delete a file in the lab directory if it exists
    RemoveFile(String),
}

/// One invocation of a lab binary and what it must do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabCase {
    pub name: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub prepare: Vec<Prepare>,
    pub expectations: Vec<Expectation>,
}

impl LabCase {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Vec::new(),
            stdin: None,
            prepare: Vec::new(),
            expectations: Vec::new(),
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    pub fn prepare(mut self, step: Prepare) -> Self {
        self.prepare.push(step);
        self
    }

    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }
}

/// Every case for one lab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabSuite {
    /// Short identifier used on the command line, e.g. `"03"`
    pub id: String,
    /// Directory under the labs root, e.g. `"03_arrays_x86_64"`
    pub lab_dir: String,
    /// Executable name inside the lab directory
    pub binary: String,
    pub title: String,
    pub cases: Vec<LabCase>,
}

impl LabSuite {
    pub fn new(id: &str, lab_dir: &str, binary: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            lab_dir: lab_dir.to_string(),
            binary: binary.to_string(),
            title: title.to_string(),
            cases: Vec::new(),
        }
    }

    pub fn case(mut self, case: LabCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Whether `selector` names this suite by id or directory
    pub fn matches(&self, selector: &str) -> bool {
        self.id == selector || self.lab_dir == selector
    }
}
