// Prompt for the résumé/job-description match analysis.
// Inputs are inserted verbatim: no truncation, escaping or validation.

/// Builds the analysis prompt. Pure and deterministic.
pub fn compose_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"
You are a smart AI resume analyzer. Analyze the following resume and job description.
Return a JSON object with:
- match_score (from 0 to 100)
- missing_keywords (list of what the resume is missing)
- summary (brief to the point suggestion)

Resume:
"""
{resume_text}
"""

Job Description:
"""
{job_description}
"""
"#
    )
}
