use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

/// One external command: a program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Everything one execution touches on disk and every command it runs.
///
/// Built purely from the request, the execution id and the scratch
/// directory, so concurrent executions never share a path.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    /// Where the submitted (possibly wrapped) source is written
    pub source_path: PathBuf,
    /// Contents written to `source_path`
    pub source: String,
    /// Compiler candidates, tried in order until one succeeds
    pub compile: Vec<ToolInvocation>,
    pub run: ToolInvocation,
    /// Files and directories removed once the execution ends
    pub artifacts: Vec<PathBuf>,
}

impl ExecutionPlan {
    pub fn needs_compile(&self) -> bool {
        !self.compile.is_empty()
    }
}

/// Best-effort removal of an execution's artifacts. Paths that are already
/// gone are fine; anything else is logged and swallowed.
pub(crate) async fn cleanup(artifacts: &[PathBuf]) {
    for path in artifacts {
        let result = match fs::symlink_metadata(path).await {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).await,
            Ok(_) => fs::remove_file(path).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => debug!("Removed scratch artifact {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove scratch artifact {}: {}", path.display(), e),
        }
    }
}
