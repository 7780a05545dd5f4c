use async_trait::async_trait;

use crate::{
    executor::{LanguageExecutor, PlanContext},
    languages::ToolCheck,
    scratch::{ExecutionPlan, ToolInvocation},
    types::Language,
};

pub struct CExecutor {
    compiler: String,
}

impl CExecutor {
    pub fn new(compiler: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
        }
    }
}

impl ToolCheck for CExecutor {
    fn required_tools(&self) -> Vec<&str> {
        vec![self.compiler.as_str()]
    }
}

#[async_trait]
impl LanguageExecutor for CExecutor {
    fn language(&self) -> Language {
        Language::C
    }

    fn plan(&self, ctx: &PlanContext<'_>) -> ExecutionPlan {
        let source_path = ctx.scratch_dir.join(format!("{}.c", ctx.execution_id));
        let binary_path = ctx.scratch_dir.join(format!("{}_exec", ctx.execution_id));

        ExecutionPlan {
            compile: vec![ToolInvocation::new(&self.compiler)
                .arg(&source_path)
                .arg("-o")
                .arg(&binary_path)],
            run: ToolInvocation::new(&binary_path),
            artifacts: vec![source_path.clone(), binary_path],
            source: ctx.code.to_string(),
            source_path,
        }
    }
}
