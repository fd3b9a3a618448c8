//! One-click résumé generation.
//!
//! A few facts about the candidate (target role, seniority, industry,
//! skills) go to the LLM, which drafts a full content structure. The draft
//! is treated exactly like user input: it passes through the content schema
//! before anyone sees it, and a draft that fails validation is an upstream
//! error, never a stored record.

pub mod prompts;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::schema::{self, ResumeContent};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeRequest {
    pub job_title: String,
    pub years_of_experience: String,
    pub industry: String,
    pub skills: Vec<String>,
}

pub async fn generate_content(
    llm: &LlmClient,
    request: &GenerateResumeRequest,
) -> Result<ResumeContent, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation("jobTitle cannot be empty".to_string()));
    }
    if request.industry.trim().is_empty() {
        return Err(AppError::Validation("industry cannot be empty".to_string()));
    }

    let prompt = prompts::build_generation_prompt(request);
    let candidate: Value = llm
        .call_json(&prompt, prompts::GENERATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate resume content: {e}")))?;

    schema::validate(&candidate)
        .map_err(|errors| AppError::Llm(format!("Generated content failed validation: {errors}")))
}
