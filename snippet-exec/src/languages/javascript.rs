use async_trait::async_trait;
use serde_json::Value;

use crate::{
    executor::{LanguageExecutor, PlanContext},
    languages::ToolCheck,
    scratch::{ExecutionPlan, ToolInvocation},
    types::Language,
};

pub struct JavaScriptExecutor {
    runtime: String,
}

impl JavaScriptExecutor {
    pub fn new(runtime: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
        }
    }
}

/// Single-line prelude defining a global `prompt(question)` that answers from
/// the non-empty lines of `input`, echoing `question + answer` to stdout.
/// Kept on one line so reported line numbers shift by exactly one.
fn prompt_prelude(input: &str) -> String {
    let input = Value::String(input.to_string());
    format!(
        "(() => {{ const lines = {}.split('\\n').filter((line) => line.trim() !== ''); \
         let next = 0; globalThis.prompt = (question = '') => {{ \
         if (next >= lines.length) return ''; const answer = lines[next++]; \
         console.log(question + answer); return answer; }}; }})();",
        input
    )
}

impl ToolCheck for JavaScriptExecutor {
    fn required_tools(&self) -> Vec<&str> {
        vec![self.runtime.as_str()]
    }
}

#[async_trait]
impl LanguageExecutor for JavaScriptExecutor {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn plan(&self, ctx: &PlanContext<'_>) -> ExecutionPlan {
        let source_path = ctx.scratch_dir.join(format!("{}.js", ctx.execution_id));

        ExecutionPlan {
            run: ToolInvocation::new(&self.runtime).arg(&source_path),
            compile: Vec::new(),
            artifacts: vec![source_path.clone()],
            source: format!("{}\n{}\n", prompt_prelude(ctx.input), ctx.code),
            source_path,
        }
    }
}
