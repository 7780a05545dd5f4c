use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tokio::fs;

use crate::{
    error::Error,
    executor::{LanguageExecutor, PlanContext},
    languages::ToolCheck,
    scratch::{ExecutionPlan, ToolInvocation},
    types::Language,
};

static PUBLIC_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+class\s+(\w+)").expect("public class pattern is valid")
});

/// Name of the first `public class` declared in `code`, if any
pub(crate) fn public_class_name(code: &str) -> Option<&str> {
    PUBLIC_CLASS
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Compiles with `javac` and runs the resulting class on the JVM.
///
/// The unit name comes from the submitted source, so two executions may
/// derive the same `Main.java`. Each execution therefore compiles inside its
/// own `{scratch}/{execution_id}/` directory, which is also what gets removed
/// afterwards (nested and anonymous classes included).
pub struct JavaExecutor {
    compiler: String,
    runtime: String,
}

impl JavaExecutor {
    pub fn new(compiler: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            runtime: runtime.into(),
        }
    }
}

impl ToolCheck for JavaExecutor {
    fn required_tools(&self) -> Vec<&str> {
        vec![self.compiler.as_str(), self.runtime.as_str()]
    }
}

#[async_trait]
impl LanguageExecutor for JavaExecutor {
    fn language(&self) -> Language {
        Language::Java
    }

    fn plan(&self, ctx: &PlanContext<'_>) -> ExecutionPlan {
        let (unit, source) = match public_class_name(ctx.code) {
            Some(name) => (name.to_string(), ctx.code.to_string()),
            None => {
                let name = format!("Main{}", ctx.execution_id);
                let wrapped = format!("public class {} {{\n{}\n}}", name, ctx.code);
                (name, wrapped)
            }
        };

        let class_dir = ctx.scratch_dir.join(ctx.execution_id.as_str());
        let source_path = class_dir.join(format!("{}.java", unit));

        ExecutionPlan {
            compile: vec![ToolInvocation::new(&self.compiler)
                .arg("-d")
                .arg(&class_dir)
                .arg(&source_path)],
            run: ToolInvocation::new(&self.runtime)
                .arg("-cp")
                .arg(&class_dir)
                .arg(&unit),
            artifacts: vec![class_dir],
            source,
            source_path,
        }
    }

    async fn write_source(&self, plan: &ExecutionPlan) -> Result<(), Error> {
        if let Some(class_dir) = plan.source_path.parent() {
            fs::create_dir_all(class_dir).await?;
        }
        fs::write(&plan.source_path, &plan.source).await?;
        Ok(())
    }
}
