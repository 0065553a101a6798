//! AI request handlers — prompt assembly and LLM dispatch.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use smartslot_core::models::scheduling::Task;
use smartslot_core::prompts::{AuditorResponse, ReasonerResponse, RefactorerResponse};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{AuditRequest, ReasonRequest, RefactorRequest, WorkflowRequest};
use crate::services::ai;

/// `POST /ai/reason` — reason about a request in context.
pub async fn reason_handler(
    State(state): State<AppState>,
    Json(body): Json<ReasonRequest>,
) -> AppResult<Json<ReasonerResponse>> {
    let resp = ai::reason(&state, &body.prompt, body.context.as_deref()).await?;
    Ok(Json(resp))
}

/// `POST /ai/audit` — score a prompt and classify its risk.
pub async fn audit_handler(
    State(state): State<AppState>,
    Json(body): Json<AuditRequest>,
) -> AppResult<Json<AuditorResponse>> {
    let resp = ai::audit(&state, &body.prompt).await?;
    Ok(Json(resp))
}

/// `POST /ai/refactor` — rewrite a rough request in three registers.
pub async fn refactor_handler(
    State(state): State<AppState>,
    Json(body): Json<RefactorRequest>,
) -> AppResult<Json<RefactorerResponse>> {
    let resp = ai::refactor(&state, &body.request).await?;
    Ok(Json(resp))
}

/// `POST /ai/workflow` — generate two setup tasks for a resource and
/// store them as the caller's tasks.
pub async fn workflow_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<WorkflowRequest>,
) -> AppResult<(StatusCode, Json<Vec<Task>>)> {
    let tasks = ai::generate_workflow(&state, user.user_id()?, body.resource_id).await?;
    Ok((StatusCode::CREATED, Json(tasks)))
}
