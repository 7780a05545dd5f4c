use super::*;
use crate::languages::skip_if_not_available;
use crate::tests::fixtures::{code_samples::C_HELLO, echo_input, endless, exit_two, syntax_errors};

#[tokio::test]
async fn test_c_basic() -> Result<()> {
    if skip_if_not_available(&["gcc"]) {
        return Ok(());
    }
    test_language_execution(Language::C, C_HELLO, "Hello from C!").await
}

#[tokio::test]
async fn test_c_input() -> Result<()> {
    if skip_if_not_available(&["gcc"]) {
        return Ok(());
    }
    test_language_input(Language::C, echo_input::C, "line one\nline two\n", "line one").await
}

#[tokio::test]
async fn test_c_exit_code() -> Result<()> {
    if skip_if_not_available(&["gcc"]) {
        return Ok(());
    }
    test_language_exit_code(Language::C, exit_two::C).await
}

#[tokio::test]
async fn test_c_timeout() -> Result<()> {
    if skip_if_not_available(&["gcc"]) {
        return Ok(());
    }
    test_language_timeout(Language::C, endless::C, Some("tick\n")).await
}

#[tokio::test]
async fn test_c_compile_error() -> Result<()> {
    if skip_if_not_available(&["gcc"]) {
        return Ok(());
    }
    test_language_compile_error(Language::C, syntax_errors::C).await
}
