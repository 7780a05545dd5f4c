use super::*;
use crate::languages::skip_if_not_available;
use crate::tests::fixtures::{code_samples::PYTHON_HELLO, echo_input, endless, exit_two};

#[tokio::test]
async fn test_python_basic() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    test_language_execution(Language::Python, PYTHON_HELLO, "Hello from Python!").await
}

#[tokio::test]
async fn test_python_input() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    test_language_input(Language::Python, echo_input::PYTHON, "test user\n", "test user").await
}

#[tokio::test]
async fn test_python_exit_code() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    test_language_exit_code(Language::Python, exit_two::PYTHON).await
}

#[tokio::test]
async fn test_python_timeout() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    test_language_timeout(Language::Python, endless::PYTHON, Some("tick\n")).await
}

#[tokio::test]
async fn test_python_traceback_is_the_error() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    let dir = tempdir()?;
    let result = run_checked(
        test_config(&dir),
        Language::Python,
        "print('before')\nraise ValueError('boom')",
        "",
    )
    .await?;

    assert_eq!(result.output, "before\n");
    assert_eq!(result.status, ExecutionStatus::Stderr);
    assert!(result.error.contains("ValueError: boom"));
    Ok(())
}
