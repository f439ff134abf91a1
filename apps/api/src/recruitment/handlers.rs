//! Axum route handler for the recruitment process lookup.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecruitmentRequest {
    pub company_name: String,
    pub job_role: String,
}

#[derive(Debug, Serialize)]
pub struct RecruitmentResponse {
    pub recruitment_process: String,
}

/// POST /get_recruitment
///
/// Plain-text recruitment rounds for a fresher role at a company.
pub async fn handle_get_recruitment(
    State(state): State<AppState>,
    Json(request): Json<RecruitmentRequest>,
) -> Result<Json<RecruitmentResponse>, AppError> {
    if request.company_name.trim().is_empty() || request.job_role.trim().is_empty() {
        return Err(AppError::Validation(
            "company_name and job_role cannot be empty".to_string(),
        ));
    }

    let recruitment_process = state
        .recruitment
        .fetch(request.company_name.trim(), request.job_role.trim())
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(RecruitmentResponse {
        recruitment_process,
    }))
}
