use super::*;
use crate::languages::skip_if_not_available;
use crate::tests::fixtures::{code_samples::JS_HELLO, echo_input, endless, exit_two};

#[tokio::test]
async fn test_javascript_basic() -> Result<()> {
    if skip_if_not_available(&["node"]) {
        return Ok(());
    }
    test_language_execution(Language::JavaScript, JS_HELLO, "Hello from JavaScript!").await
}

#[tokio::test]
async fn test_javascript_stdin() -> Result<()> {
    if skip_if_not_available(&["node"]) {
        return Ok(());
    }
    test_language_input(Language::JavaScript, echo_input::JS, "first\nsecond\n", "first").await
}

#[tokio::test]
async fn test_javascript_prompt() -> Result<()> {
    if skip_if_not_available(&["node"]) {
        return Ok(());
    }
    test_language_input(
        Language::JavaScript,
        echo_input::JS_PROMPT,
        "\nAda\n",
        "Name: Ada\nHi Ada",
    )
    .await
}

#[tokio::test]
async fn test_javascript_exit_code() -> Result<()> {
    if skip_if_not_available(&["node"]) {
        return Ok(());
    }
    test_language_exit_code(Language::JavaScript, exit_two::JS).await
}

#[tokio::test]
async fn test_javascript_timeout() -> Result<()> {
    if skip_if_not_available(&["node"]) {
        return Ok(());
    }
    test_language_timeout(Language::JavaScript, endless::JS, None).await
}
