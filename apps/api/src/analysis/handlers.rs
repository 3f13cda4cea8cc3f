//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::analysis::pipeline::{run_analysis, AnalysisRequest, AnalysisResult};
use crate::errors::AppError;
use crate::state::AppState;

pub const FILE_FIELD: &str = "file";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// POST /analyze (and /analyze/)
///
/// Multipart form: `file` (PDF) + `job_description` (text).
/// Returns `{"result": "<raw model text>"}`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let request = read_analysis_form(multipart).await?;
    let result = run_analysis(&request, state.llm.as_ref()).await?;
    Ok(Json(result))
}

/// Reads the whole form into memory. Missing fields are rejected here,
/// before any extraction or model call happens.
async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut resume_bytes: Option<Bytes> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) if resume_bytes.is_none() => {
                resume_bytes = Some(field.bytes().await?);
            }
            Some(JOB_DESCRIPTION_FIELD) if job_description.is_none() => {
                let raw = field.bytes().await?;
                let text = String::from_utf8(raw.to_vec()).map_err(|_| {
                    AppError::Validation(format!(
                        "Form field '{JOB_DESCRIPTION_FIELD}' must be valid UTF-8"
                    ))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let resume_bytes = resume_bytes
        .ok_or_else(|| AppError::Validation(format!("Missing form field '{FILE_FIELD}'")))?;
    let job_description = job_description.ok_or_else(|| {
        AppError::Validation(format!("Missing form field '{JOB_DESCRIPTION_FIELD}'"))
    })?;

    Ok(AnalysisRequest {
        resume_bytes,
        job_description,
    })
}
