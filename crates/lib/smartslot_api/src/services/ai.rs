//! AI service — renders prompt templates, calls the LLM provider, and
//! parses the fixed-schema JSON replies.

use tracing::debug;
use uuid::Uuid;

use smartslot_core::llm::{LlmClient, parse_json_response};
use smartslot_core::models::scheduling::Task;
use smartslot_core::prompts::{
    AUDITOR_TEMPLATE, AuditorResponse, REASONER_TEMPLATE, REFACTORER_TEMPLATE, ReasonerResponse,
    RefactorerResponse, WORKFLOW_TEMPLATE, parse_workflow_tasks, render,
};
use smartslot_core::scheduling::{resources, tasks};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// The configured LLM client, or a validation error when `/ai/*` is
/// unconfigured.
fn client(state: &AppState) -> AppResult<&LlmClient> {
    state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::Validation("No LLM provider configured".into()))
}

/// Reason about a request in context.
pub async fn reason(
    state: &AppState,
    prompt: &str,
    context: Option<&str>,
) -> AppResult<ReasonerResponse> {
    let rendered = render(
        REASONER_TEMPLATE,
        &[("PROMPT", prompt), ("CONTEXT", context.unwrap_or("none"))],
    );
    let reply = client(state)?.complete(&rendered).await?;
    debug!(len = reply.len(), "reasoner reply received");
    Ok(parse_json_response(&reply)?)
}

/// Audit a prompt for clarity, specificity, and safety.
pub async fn audit(state: &AppState, prompt: &str) -> AppResult<AuditorResponse> {
    let rendered = render(AUDITOR_TEMPLATE, &[("PROMPT", prompt)]);
    let reply = client(state)?.complete(&rendered).await?;
    Ok(parse_json_response(&reply)?)
}

/// Refactor a rough request into refined/structured/minimal rewrites.
pub async fn refactor(state: &AppState, request: &str) -> AppResult<RefactorerResponse> {
    let rendered = render(REFACTORER_TEMPLATE, &[("REQUEST", request)]);
    let reply = client(state)?.complete(&rendered).await?;
    Ok(parse_json_response(&reply)?)
}

/// Generate the two setup tasks for a resource and store them as the
/// caller's tasks.
pub async fn generate_workflow(
    state: &AppState,
    owner_id: Uuid,
    resource_id: Uuid,
) -> AppResult<Vec<Task>> {
    let resource = resources::get_resource(&state.pool, resource_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resource not found".into()))?;

    let rendered = render(WORKFLOW_TEMPLATE, &[("resourceName", &resource.name)]);
    let reply = client(state)?.complete(&rendered).await?;
    let generated = parse_workflow_tasks(&reply)?;

    let mut created = Vec::with_capacity(generated.len());
    for task in &generated {
        created.push(
            tasks::create_task(&state.pool, owner_id, &task.title, Some(&task.description))
                .await?,
        );
    }
    Ok(created)
}
