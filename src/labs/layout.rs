//! Where lab artifacts live on disk

use std::path::{Path, PathBuf};

use super::case::LabSuite;

/// Fixed per-lab layout under a labs root
///
/// ```text
/// <root>/<lab_dir>/<binary>
/// <root>/<lab_dir>/<data files>
/// ```
#[derive(Debug, Clone)]
pub struct LabLayout {
    root: PathBuf,
}

impl LabLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lab_dir(&self, suite: &LabSuite) -> PathBuf {
        self.root.join(&suite.lab_dir)
    }

    pub fn binary_path(&self, suite: &LabSuite) -> PathBuf {
        self.lab_dir(suite).join(&suite.binary)
    }

    /// Resolve a file named relative to the lab directory
    pub fn lab_file(&self, suite: &LabSuite, relative: &str) -> PathBuf {
        self.lab_dir(suite).join(relative)
    }

    /// Whether the lab's binary has been built
    pub fn binary_present(&self, suite: &LabSuite) -> bool {
        self.binary_path(suite).is_file()
    }
}
