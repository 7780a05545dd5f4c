use super::utils::{defaults::*, scratch};
use crate::{
    CodeExecutionService, ExecutionId, ExecutionRequest, ExecutionResult, ExecutionStatus,
    ExecutorConfig, Language, Result,
};
use tempfile::tempdir;

pub mod c;
pub mod cpp;
pub mod javascript;
pub mod python;

/// Execute once and check that nothing named after the execution survives.
async fn run_checked(
    config: ExecutorConfig,
    language: Language,
    code: &str,
    input: &str,
) -> Result<ExecutionResult> {
    let service = CodeExecutionService::new(config.clone()).await?;
    let id = ExecutionId::generate();

    let request = ExecutionRequest::new(language.as_str(), code).with_input(input);
    let result = service.execute_with_id(request, id.clone()).await;

    let leftovers = scratch::leftovers(&config, &id);
    assert!(leftovers.is_empty(), "artifacts left behind: {:?}", leftovers);
    Ok(result)
}

pub(crate) async fn test_language_execution(
    language: Language,
    code: &str,
    expected: &str,
) -> Result<()> {
    let dir = tempdir()?;
    let result = run_checked(test_config(&dir), language, code, "").await?;

    assert_eq!(result.error, "", "unexpected error for {}", language);
    assert!(result.is_success());
    assert_eq!(result.output.trim_end(), expected);
    Ok(())
}

pub(crate) async fn test_language_input(
    language: Language,
    code: &str,
    input: &str,
    expected: &str,
) -> Result<()> {
    let dir = tempdir()?;
    let result = run_checked(test_config(&dir), language, code, input).await?;

    assert_eq!(result.error, "");
    assert_eq!(result.output.trim_end(), expected);
    Ok(())
}

pub(crate) async fn test_language_exit_code(language: Language, code: &str) -> Result<()> {
    let dir = tempdir()?;
    let result = run_checked(test_config(&dir), language, code, "").await?;

    assert_eq!(result.error, "Process exited with code 2");
    assert_eq!(result.status, ExecutionStatus::NonZeroExit);
    assert!(!result.is_success());
    Ok(())
}

pub(crate) async fn test_language_timeout(
    language: Language,
    code: &str,
    flushed: Option<&str>,
) -> Result<()> {
    let dir = tempdir()?;
    let result = run_checked(short_timeout_config(&dir), language, code, "").await?;

    assert_eq!(result.status, ExecutionStatus::Timeout);
    assert_eq!(result.error, "Execution timeout (2 seconds)");
    assert!(result.execution_time >= 2000);
    assert!(result.execution_time < 5000, "took {}ms", result.execution_time);
    if let Some(flushed) = flushed {
        assert_eq!(result.output, flushed);
    }
    Ok(())
}

pub(crate) async fn test_language_compile_error(language: Language, code: &str) -> Result<()> {
    let dir = tempdir()?;
    let result = run_checked(test_config(&dir), language, code, "").await?;

    assert_eq!(result.status, ExecutionStatus::CompileError);
    assert!(result.error.starts_with("Compilation error: "), "{}", result.error);
    assert_eq!(result.output, "");
    assert_eq!(result.execution_time, 0);
    Ok(())
}
