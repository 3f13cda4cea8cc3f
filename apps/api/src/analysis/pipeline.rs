//! Upload → extract → compose → complete.
//!
//! Each step returns its own error kind; they are only flattened into the
//! generic `{"error": ...}` body at the HTTP boundary (see `errors.rs`).

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::analysis::extractor::{spawn_extract_text, ExtractionError};
use crate::analysis::prompts::compose_prompt;
use crate::llm_client::{CompletionClient, CompletionError};

/// One analysis call. Lives only as long as the request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_bytes: Bytes,
    pub job_description: String,
}

/// Raw model output. Not parsed or validated, even though the prompt asks for JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "result")]
    pub raw_text: String,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

pub async fn run_analysis(
    request: &AnalysisRequest,
    llm: &dyn CompletionClient,
) -> Result<AnalysisResult, AnalysisError> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        upload_bytes = request.resume_bytes.len(),
        "Starting resume analysis"
    );

    let resume_text = spawn_extract_text(request.resume_bytes.clone()).await?;
    info!(
        %request_id,
        extracted_chars = resume_text.chars().count(),
        "Extracted resume text"
    );

    let prompt = compose_prompt(&resume_text, &request.job_description);
    let raw_text = llm.complete(&prompt).await?;

    info!(%request_id, response_chars = raw_text.len(), "Analysis complete");
    Ok(AnalysisResult { raw_text })
}
