//! # Snippet Execution
//!
//! Runs user-submitted source code in one of five languages. Each request gets
//! its own scratch artifacts, an optional compile step, a bounded run and an
//! in-band result record. Beyond the run timeout and a forced kill there is no
//! isolation: no namespaces, resource limits or restricted filesystem.

mod config;
mod error;
mod executor;
mod languages;
mod runner;
mod scratch;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::{ExecutorConfig, Toolchains};
pub use error::Error;
pub use executor::{CodeExecutor, LanguageExecutor, PlanContext};
pub use scratch::{ExecutionPlan, ToolInvocation};
pub use service::CodeExecutionService;
pub use types::{ExecutionId, ExecutionRequest, ExecutionResult, ExecutionStatus, Language};

/// Result type for code execution operations
pub type Result<T> = std::result::Result<T, Error>;
