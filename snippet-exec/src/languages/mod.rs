//! Language-specific executor implementations

mod c;
mod cpp;
mod java;
mod javascript;
mod python;

pub use c::CExecutor;
pub use cpp::CppExecutor;
pub use java::JavaExecutor;
pub use javascript::JavaScriptExecutor;
pub use python::PythonExecutor;

use crate::error::Error;
use which::which;

pub trait ToolCheck {
    fn required_tools(&self) -> Vec<&str>;

    fn missing_tools(&self) -> Vec<String> {
        self.required_tools()
            .into_iter()
            .filter(|tool| which(tool).is_err())
            .map(str::to_string)
            .collect()
    }

    fn check_tools(&self) -> Result<(), Error> {
        let missing = self.missing_tools();
        if !missing.is_empty() {
            return Err(Error::Spawn(format!(
                "Missing required tools: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn skip_if_not_available(tools: &[&str]) -> bool {
    let missing: Vec<_> = tools
        .iter()
        .filter(|tool| which(**tool).is_err())
        .map(|s| (*s).to_string())
        .collect();

    if !missing.is_empty() {
        eprintln!("Skipping test: {} not available", missing.join(", "));
        return true;
    }
    false
}
