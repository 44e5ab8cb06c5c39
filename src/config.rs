//! Harness configuration
//!
//! Defaults can be overridden by a `labcheck.toml` file:
//!
//! ```toml
//! timeout_secs = 10
//! ensure_executable = true
//! labs_root = "labs"
//! parallel = false
//! ```
//!
//! `LABCHECK_LABS_ROOT` overrides `labs_root`; command-line flags override
//! both.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::runner::DEFAULT_TIMEOUT;

/// File looked up in the current directory when no path is given
pub const CONFIG_FILE_NAME: &str = "labcheck.toml";

/// Environment variable overriding `labs_root`
pub const LABS_ROOT_ENV: &str = "LABCHECK_LABS_ROOT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Wall-clock bound per invocation, in seconds
    pub timeout_secs: u64,
    /// Add executable bits to lab binaries before running them
    pub ensure_executable: bool,
    /// Directory containing one subdirectory per lab
    pub labs_root: PathBuf,
    /// Run different labs on separate threads
    pub parallel: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            ensure_executable: true,
            labs_root: PathBuf::from("labs"),
            parallel: false,
        }
    }
}

impl HarnessConfig {
    /// Load configuration
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// `labcheck.toml` in the current directory is used when present and
    /// defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(root) = std::env::var_os(LABS_ROOT_ENV).filter(|v| !v.is_empty()) {
            config.labs_root = PathBuf::from(root);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
