//! LLM prompt templates with `{{NAME}}` placeholder substitution.
//!
//! Each template instructs the model to answer with a single JSON document
//! matching a fixed schema; the rendered text is sent verbatim to the
//! completion endpoint and the reply is deserialized into the matching
//! response model.

use serde::{Deserialize, Serialize};

use crate::llm::LlmError;

/// Reasoning prompt: weigh a request against its context.
///
/// Placeholders: `{{PROMPT}}`, `{{CONTEXT}}`.
pub const REASONER_TEMPLATE: &str = "\
You are a scheduling assistant helping to reason about a user request.

Request:
{{PROMPT}}

Context:
{{CONTEXT}}

Think through the request step by step, then answer with a single JSON \
object and nothing else, using exactly this shape:
{
  \"reasoning\": \"<your step-by-step reasoning>\",
  \"recommendation\": \"<the single best course of action>\",
  \"alternatives\": [\"<alternative 1>\", \"<alternative 2>\"]
}";

/// Audit prompt: score a prompt for clarity, specificity, and safety.
///
/// Placeholder: `{{PROMPT}}`.
pub const AUDITOR_TEMPLATE: &str = "\
You are auditing a prompt before it is sent to an AI system.

Prompt under audit:
{{PROMPT}}

Score each dimension from 0 to 10 and classify the overall risk as \
\"low\", \"medium\", or \"high\". Answer with a single JSON object and \
nothing else:
{
  \"scores\": { \"clarity\": 0, \"specificity\": 0, \"safety\": 0 },
  \"risk\": \"low\"
}";

/// Refactor prompt: rewrite a request in three registers.
///
/// Placeholder: `{{REQUEST}}`.
pub const REFACTORER_TEMPLATE: &str = "\
You refine rough requests into well-formed prompts.

Original request:
{{REQUEST}}

Produce three rewrites and answer with a single JSON object and nothing \
else:
{
  \"refined\": \"<a polished full rewrite>\",
  \"structured\": \"<the rewrite broken into explicit steps>\",
  \"minimal\": \"<the shortest rewrite that preserves the intent>\"
}";

/// Workflow prompt: generate the onboarding tasks for a new resource.
///
/// Placeholder: `{{resourceName}}`.
pub const WORKFLOW_TEMPLATE: &str = "\
A new bookable resource named \"{{resourceName}}\" was added to a \
scheduling system. Generate the two setup tasks an operator should \
complete before the resource goes live.

Answer with a JSON array of exactly two objects and nothing else:
[
  { \"title\": \"<short imperative title>\", \"description\": \"<one or two sentences>\" },
  { \"title\": \"<short imperative title>\", \"description\": \"<one or two sentences>\" }
]";

/// Substitute `{{name}}` placeholders in a template.
///
/// Every occurrence of each named placeholder is replaced; placeholders
/// not named in `vars` are left verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

/// Reasoner response document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonerResponse {
    pub reasoning: String,
    pub recommendation: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// Per-dimension audit scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditScores {
    pub clarity: i32,
    pub specificity: i32,
    pub safety: i32,
}

/// Auditor response document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditorResponse {
    pub scores: AuditScores,
    pub risk: String,
}

/// Refactorer response document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactorerResponse {
    pub refined: String,
    pub structured: String,
    pub minimal: String,
}

/// One generated workflow task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTask {
    pub title: String,
    pub description: String,
}

/// Parse the workflow generator's reply, requiring exactly two tasks.
pub fn parse_workflow_tasks(text: &str) -> Result<Vec<WorkflowTask>, LlmError> {
    let tasks: Vec<WorkflowTask> = crate::llm::parse_json_response(text)?;
    if tasks.len() != 2 {
        return Err(LlmError::Parse(format!(
            "expected exactly 2 workflow tasks, got {}",
            tasks.len()
        )));
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_all_occurrences() {
        let out = render("{{A}} and {{B}} and {{A}}", &[("A", "x"), ("B", "y")]);
        assert_eq!(out, "x and y and x");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let out = render("{{KNOWN}} {{UNKNOWN}}", &[("KNOWN", "v")]);
        assert_eq!(out, "v {{UNKNOWN}}");
    }

    #[test]
    fn reasoner_template_renders_both_placeholders() {
        let out = render(
            REASONER_TEMPLATE,
            &[("PROMPT", "book a room"), ("CONTEXT", "3 rooms free")],
        );
        assert!(out.contains("book a room"));
        assert!(out.contains("3 rooms free"));
        assert!(!out.contains("{{PROMPT}}"));
        assert!(!out.contains("{{CONTEXT}}"));
    }

    #[test]
    fn workflow_parser_accepts_two_tasks() {
        let text = r#"[
            {"title": "Configure hours", "description": "Set opening hours."},
            {"title": "Add slots", "description": "Publish the first week."}
        ]"#;
        let tasks = parse_workflow_tasks(text).expect("parse");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Configure hours");
    }

    #[test]
    fn workflow_parser_rejects_wrong_count() {
        let text = r#"[{"title": "Only one", "description": "Not enough."}]"#;
        assert!(parse_workflow_tasks(text).is_err());
    }
}
