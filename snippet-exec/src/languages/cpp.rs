use async_trait::async_trait;

use crate::{
    executor::{LanguageExecutor, PlanContext},
    languages::ToolCheck,
    scratch::{ExecutionPlan, ToolInvocation},
    types::Language,
};

/// C++ through the native C++ compiler, falling back to the C compiler
/// linked against libstdc++.
pub struct CppExecutor {
    compiler: String,
    fallback_compiler: String,
}

impl CppExecutor {
    pub fn new(compiler: impl Into<String>, fallback_compiler: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            fallback_compiler: fallback_compiler.into(),
        }
    }
}

impl ToolCheck for CppExecutor {
    // Either compiler is enough.
    fn required_tools(&self) -> Vec<&str> {
        vec![self.compiler.as_str()]
    }

    fn missing_tools(&self) -> Vec<String> {
        let found = [&self.compiler, &self.fallback_compiler]
            .iter()
            .any(|tool| which::which(tool.as_str()).is_ok());
        if found {
            Vec::new()
        } else {
            vec![self.compiler.clone(), self.fallback_compiler.clone()]
        }
    }
}

#[async_trait]
impl LanguageExecutor for CppExecutor {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn plan(&self, ctx: &PlanContext<'_>) -> ExecutionPlan {
        let source_path = ctx.scratch_dir.join(format!("{}.cpp", ctx.execution_id));
        let binary_path = ctx.scratch_dir.join(format!("{}_exec", ctx.execution_id));

        let primary = ToolInvocation::new(&self.compiler)
            .arg(&source_path)
            .arg("-o")
            .arg(&binary_path);
        let fallback = ToolInvocation::new(&self.fallback_compiler)
            .arg(&source_path)
            .arg("-o")
            .arg(&binary_path)
            .arg("-lstdc++");

        ExecutionPlan {
            compile: vec![primary, fallback],
            run: ToolInvocation::new(&binary_path),
            artifacts: vec![source_path.clone(), binary_path],
            source: ctx.code.to_string(),
            source_path,
        }
    }
}
