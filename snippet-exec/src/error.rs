use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid execution id: {0:?}")]
    InvalidExecutionId(String),

    #[error("Compilation error: {0}")]
    CompilationError(String),

    #[error("Failed to start process: {0}")]
    Spawn(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
