use async_trait::async_trait;

use crate::{
    executor::{LanguageExecutor, PlanContext},
    languages::ToolCheck,
    scratch::{ExecutionPlan, ToolInvocation},
    types::Language,
};

pub struct PythonExecutor {
    interpreter: String,
}

impl PythonExecutor {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl ToolCheck for PythonExecutor {
    fn required_tools(&self) -> Vec<&str> {
        vec![self.interpreter.as_str()]
    }
}

#[async_trait]
impl LanguageExecutor for PythonExecutor {
    fn language(&self) -> Language {
        Language::Python
    }

    fn plan(&self, ctx: &PlanContext<'_>) -> ExecutionPlan {
        let source_path = ctx.scratch_dir.join(format!("{}.py", ctx.execution_id));

        ExecutionPlan {
            run: ToolInvocation::new(&self.interpreter).arg(&source_path),
            compile: Vec::new(),
            artifacts: vec![source_path.clone()],
            source: ctx.code.to_string(),
            source_path,
        }
    }
}
