use std::sync::Arc;

use crate::errors::AppError;
use crate::pathway::learning_path::RoleSkills;
use crate::pathway::nonit::NonItModel;
use crate::recommendation::suggest::ItModel;
use crate::recruitment::RecruitmentSource;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each domain is built once before the listener starts and is never mutated
/// afterwards. `None` means that domain failed to load; its queries answer
/// `ModelUnavailable` while the others keep working.
#[derive(Clone)]
pub struct AppState {
    pub it_model: Option<Arc<ItModel>>,
    pub role_skills: Option<Arc<RoleSkills>>,
    pub nonit_model: Option<Arc<NonItModel>>,
    /// Pluggable recruitment lookup. Default: Gemini; disabled without a key.
    pub recruitment: Arc<dyn RecruitmentSource>,
}

impl AppState {
    pub fn it_model(&self) -> Result<&ItModel, AppError> {
        self.it_model
            .as_deref()
            .ok_or_else(|| AppError::ModelUnavailable("IT".to_string()))
    }

    pub fn role_skills(&self) -> Result<&RoleSkills, AppError> {
        self.role_skills
            .as_deref()
            .ok_or_else(|| AppError::ModelUnavailable("Learning path".to_string()))
    }

    pub fn nonit_model(&self) -> Result<&NonItModel, AppError> {
        self.nonit_model
            .as_deref()
            .ok_or_else(|| AppError::ModelUnavailable("Non-IT".to_string()))
    }
}
