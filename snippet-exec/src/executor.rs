use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::{
    config::ExecutorConfig,
    error::Error,
    languages::{
        CExecutor, CppExecutor, JavaExecutor, JavaScriptExecutor, PythonExecutor, ToolCheck,
    },
    runner,
    scratch::{self, ExecutionPlan},
    types::{ExecutionId, ExecutionRequest, ExecutionResult, ExecutionStatus, Language},
};

/// Inputs an executor needs to lay out one execution
#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    pub code: &'a str,
    pub input: &'a str,
    /// Absolute path of the shared scratch directory
    pub scratch_dir: &'a Path,
    pub execution_id: &'a ExecutionId,
}

/// Trait for language-specific code executors
#[async_trait]
pub trait LanguageExecutor: ToolCheck + Send + Sync {
    fn language(&self) -> Language;

    /// Lay out source, compile candidates, run command and artifacts.
    fn plan(&self, ctx: &PlanContext<'_>) -> ExecutionPlan;

    /// Write the planned source into the scratch directory
    async fn write_source(&self, plan: &ExecutionPlan) -> Result<(), Error> {
        fs::write(&plan.source_path, &plan.source).await?;
        Ok(())
    }
}

/// Selects an executor by language and turns every outcome, including
/// internal failures, into an [`ExecutionResult`].
#[derive(Debug, Clone)]
pub struct CodeExecutor {
    config: ExecutorConfig,
}

impl CodeExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute one request. Never fails: errors are reported in-band.
    pub async fn execute(
        &self,
        request: &ExecutionRequest,
        execution_id: &ExecutionId,
    ) -> ExecutionResult {
        let language: Language = match request.language.parse() {
            Ok(language) => language,
            Err(e) => {
                warn!("Rejected execution {}: {}", execution_id, e);
                return ExecutionResult::rejected(
                    ExecutionStatus::UnsupportedLanguage,
                    e.to_string(),
                );
            }
        };

        match self.execute_language(language, request, execution_id).await {
            Ok(result) => {
                info!(
                    "Execution {} ({}) finished: {:?} in {}ms",
                    execution_id, language, result.status, result.execution_time
                );
                result
            }
            Err(e) => {
                error!("Execution {} ({}) failed: {}", execution_id, language, e);
                ExecutionResult::rejected(ExecutionStatus::DispatchFailure, e.to_string())
            }
        }
    }

    async fn execute_language(
        &self,
        language: Language,
        request: &ExecutionRequest,
        execution_id: &ExecutionId,
    ) -> Result<ExecutionResult, Error> {
        fs::create_dir_all(&self.config.scratch_dir).await?;
        let scratch_dir = fs::canonicalize(&self.config.scratch_dir).await?;

        let executor = self.create_executor(language);
        let plan = executor.plan(&PlanContext {
            code: &request.code,
            input: &request.input,
            scratch_dir: &scratch_dir,
            execution_id,
        });

        let result = self
            .write_compile_run(executor.as_ref(), &plan, &scratch_dir, &request.input)
            .await;

        // Every exit path ends here, so artifacts never outlive the execution.
        scratch::cleanup(&plan.artifacts).await;
        result
    }

    async fn write_compile_run(
        &self,
        executor: &dyn LanguageExecutor,
        plan: &ExecutionPlan,
        scratch_dir: &Path,
        input: &str,
    ) -> Result<ExecutionResult, Error> {
        executor.write_source(plan).await?;
        debug!("Wrote {}", plan.source_path.display());

        if plan.needs_compile() {
            let compiled =
                runner::compile_first_success(&plan.compile, scratch_dir, self.config.compile_timeout)
                    .await;
            if let Err(e) = compiled {
                warn!("{} compilation failed: {}", executor.language(), e);
                return Ok(ExecutionResult::rejected(
                    ExecutionStatus::CompileError,
                    e.to_string(),
                ));
            }
        }

        let outcome = runner::run(&plan.run, scratch_dir, input, self.config.run_timeout).await?;
        Ok(outcome.into_result(self.config.timeout_message()))
    }

    pub fn create_executor(&self, language: Language) -> Box<dyn LanguageExecutor> {
        let toolchains = &self.config.toolchains;
        match language {
            Language::Python => Box::new(PythonExecutor::new(&toolchains.python)),
            Language::JavaScript => Box::new(JavaScriptExecutor::new(&toolchains.node)),
            Language::C => Box::new(CExecutor::new(&toolchains.gcc)),
            Language::Cpp => Box::new(CppExecutor::new(&toolchains.gxx, &toolchains.gcc)),
            Language::Java => Box::new(JavaExecutor::new(&toolchains.javac, &toolchains.java)),
        }
    }

    /// Languages whose toolchains are all on `PATH`
    pub fn available_languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| self.create_executor(*language).check_tools().is_ok())
            .collect()
    }
}
