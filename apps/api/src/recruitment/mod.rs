//! Recruitment process lookup: a pluggable source of a plain-text
//! description of a company's hiring rounds.
//!
//! Default: `GeminiRecruitmentSource` (generative text via `llm_client`).
//! Without an API key the service runs with `DisabledRecruitmentSource`.
//!
//! `AppState` holds an `Arc<dyn RecruitmentSource>`, chosen at startup. It
//! shares nothing with the recommendation models.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};
use crate::recruitment::prompts::{recruitment_prompt, RECRUITMENT_SYSTEM};

#[async_trait]
pub trait RecruitmentSource: Send + Sync {
    async fn fetch(&self, company_name: &str, job_role: &str) -> Result<String, LlmError>;
}

pub struct GeminiRecruitmentSource(pub LlmClient);

#[async_trait]
impl RecruitmentSource for GeminiRecruitmentSource {
    async fn fetch(&self, company_name: &str, job_role: &str) -> Result<String, LlmError> {
        let prompt = recruitment_prompt(company_name, job_role);
        self.0.call_text(&prompt, RECRUITMENT_SYSTEM).await
    }
}

/// Stand-in used when no API key is configured.
pub struct DisabledRecruitmentSource;

#[async_trait]
impl RecruitmentSource for DisabledRecruitmentSource {
    async fn fetch(&self, _company_name: &str, _job_role: &str) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }
}
