use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;

/// Settings shared by every execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Shared scratch directory; created if absent, never removed
    pub scratch_dir: PathBuf,
    /// Wall-clock budget for the program run, counted from spawn
    #[serde(with = "duration_serde")]
    pub run_timeout: Duration,
    /// Budget for each compiler invocation, independent of the run budget
    #[serde(with = "duration_serde")]
    pub compile_timeout: Duration,
    pub toolchains: Toolchains,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from("/tmp/code-exec"),
            run_timeout: Duration::from_secs(10),
            compile_timeout: Duration::from_secs(5),
            toolchains: Toolchains::default(),
        }
    }
}

impl ExecutorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    pub fn with_run_timeout(mut self, run_timeout: Duration) -> Self {
        self.run_timeout = run_timeout;
        self
    }

    pub fn with_compile_timeout(mut self, compile_timeout: Duration) -> Self {
        self.compile_timeout = compile_timeout;
        self
    }

    /// Error text reported when the run budget is exhausted
    pub fn timeout_message(&self) -> String {
        format!("Execution timeout ({})", describe_limit(self.run_timeout))
    }
}

/// Human-readable budget: whole seconds when exact, milliseconds otherwise
pub(crate) fn describe_limit(limit: Duration) -> String {
    if limit.subsec_nanos() == 0 {
        format!("{} seconds", limit.as_secs())
    } else {
        format!("{} milliseconds", limit.as_millis())
    }
}

/// Commands used to compile and run each language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchains {
    pub python: String,
    pub node: String,
    pub gcc: String,
    pub gxx: String,
    pub javac: String,
    pub java: String,
}

impl Default for Toolchains {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            node: "node".to_string(),
            gcc: "gcc".to_string(),
            gxx: "g++".to_string(),
            javac: "javac".to_string(),
            java: "java".to_string(),
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
