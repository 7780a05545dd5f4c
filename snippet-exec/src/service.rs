use std::sync::Arc;
use tracing::debug;

use crate::{
    config::ExecutorConfig,
    error::Error,
    executor::CodeExecutor,
    types::{ExecutionId, ExecutionRequest, ExecutionResult, Language},
};

/// Entry point for callers: mints execution ids and hands requests to the
/// dispatcher. Cheap to clone; executions share nothing but the scratch
/// directory.
#[derive(Debug, Clone)]
pub struct CodeExecutionService {
    executor: Arc<CodeExecutor>,
}

impl CodeExecutionService {
    pub async fn new(config: ExecutorConfig) -> Result<Self, Error> {
        tokio::fs::create_dir_all(&config.scratch_dir)
            .await
            .map_err(|e| {
                Error::Config(format!(
                    "Failed to create scratch directory {}: {}",
                    config.scratch_dir.display(),
                    e
                ))
            })?;

        Ok(Self {
            executor: Arc::new(CodeExecutor::new(config)),
        })
    }

    pub async fn execute(&self, request: ExecutionRequest) -> ExecutionResult {
        self.execute_with_id(request, ExecutionId::generate()).await
    }

    pub async fn execute_with_id(
        &self,
        request: ExecutionRequest,
        execution_id: ExecutionId,
    ) -> ExecutionResult {
        debug!(
            "Starting execution {} for language {:?}",
            execution_id, request.language
        );
        self.executor.execute(&request, &execution_id).await
    }

    pub fn config(&self) -> &ExecutorConfig {
        self.executor.config()
    }

    pub fn available_languages(&self) -> Vec<Language> {
        self.executor.available_languages()
    }
}
