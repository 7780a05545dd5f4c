pub mod defaults {
    use crate::{CodeExecutionService, ExecutorConfig, Result};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Default budgets with a per-test scratch directory
    pub fn test_config(dir: &TempDir) -> ExecutorConfig {
        ExecutorConfig::default().with_scratch_dir(dir.path().join("code-exec"))
    }

    /// Short run budget for timeout tests
    pub fn short_timeout_config(dir: &TempDir) -> ExecutorConfig {
        test_config(dir).with_run_timeout(Duration::from_secs(2))
    }

    pub async fn setup_test_service(dir: &TempDir) -> Result<CodeExecutionService> {
        CodeExecutionService::new(test_config(dir)).await
    }
}

pub mod scratch {
    use crate::{ExecutionId, ExecutorConfig};

    /// Scratch entries whose name mentions `id`
    pub fn leftovers(config: &ExecutorConfig, id: &ExecutionId) -> Vec<String> {
        std::fs::read_dir(&config.scratch_dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .filter(|name| name.contains(id.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_empty(config: &ExecutorConfig) -> bool {
        std::fs::read_dir(&config.scratch_dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true)
    }
}
