//! Axum route handlers for IT resource suggestions.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::recommendation::suggest::Suggestions;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendItRequest {
    pub job_role: String,
    pub skill: String,
}

/// POST /recommend_it
///
/// Top certifications, internships and projects for a role and skill.
pub async fn handle_recommend_it(
    State(state): State<AppState>,
    Json(request): Json<RecommendItRequest>,
) -> Result<Json<Suggestions>, AppError> {
    let model = state.it_model()?;

    if request.job_role.trim().is_empty() && request.skill.trim().is_empty() {
        return Err(AppError::Validation(
            "job_role and skill cannot both be empty".to_string(),
        ));
    }

    let suggestions = model.suggest(&request.job_role, &request.skill);
    debug!("Returning {} IT suggestions", suggestions.total());
    Ok(Json(suggestions))
}
