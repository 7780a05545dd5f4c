use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Supported programming languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    C,
    Cpp,
    Java,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::JavaScript,
        Language::C,
        Language::Cpp,
        Language::Java,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// Whether a toolchain step runs before the program itself
    pub fn is_compiled(&self) -> bool {
        matches!(self, Language::C | Language::Cpp | Language::Java)
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::JavaScript),
            "c" => Ok(Language::C),
            "cpp" => Ok(Language::Cpp),
            "java" => Ok(Language::Java),
            _ => Err(Error::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code execution request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Source code to execute
    pub code: String,
    /// Language name as submitted; validated by the dispatcher
    pub language: String,
    /// Text fed to the program's stdin
    #[serde(default)]
    pub input: String,
}

impl ExecutionRequest {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            input: String::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }
}

/// Per-request token namespacing every scratch artifact of one execution.
///
/// Restricted to ASCII alphanumerics and `_` so it can appear in file names
/// and in a synthesized JVM class name alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExecutionId(String);

impl ExecutionId {
    const MAX_LEN: usize = 64;

    /// Millisecond timestamp plus a random suffix, so ids minted in the same
    /// millisecond still differ.
    pub fn generate() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}_{}", Utc::now().timestamp_millis(), &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ExecutionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(Error::InvalidExecutionId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an execution ended. Carried alongside the wire fields for Rust callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionStatus {
    #[default]
    Success,
    UnsupportedLanguage,
    CompileError,
    Timeout,
    NonZeroExit,
    Stderr,
    DispatchFailure,
}

/// Execution result as returned to callers: `output`, `error`, `executionTime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Captured stdout, partial if the run was cut short
    pub output: String,
    /// Empty on success
    pub error: String,
    /// Run time in milliseconds, compile time excluded
    pub execution_time: u64,
    #[serde(skip)]
    pub status: ExecutionStatus,
}

impl ExecutionResult {
    /// A result for an execution that never reached a running program.
    pub fn rejected(status: ExecutionStatus, error: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            error: error.into(),
            execution_time: 0,
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }
}
