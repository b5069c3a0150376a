use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use super::prompts::{ANALYSIS_SYSTEM_TEMPLATE, ANALYSIS_USER_TEMPLATE};
use super::schema::{analysis_json_schema, StructuredAnalysis};
use crate::llm_client::{prompts::JSON_ONLY_SYSTEM, strip_json_fences, LlmClient, LlmError};

/// Low temperature keeps keyword extraction stable between runs.
const ANALYSIS_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Provider output is not valid JSON: {0}")]
    MalformedProviderOutput(String),

    #[error("Provider output does not match the analysis schema: {0}")]
    SchemaViolation(String),

    #[error("Provider rejected the content: {0}")]
    ContentRejected(String),

    #[error("Provider call failed: {0}")]
    ProviderError(String),
}

impl AnalysisError {
    /// Short message safe to store on a failed job and show to its owner.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::MalformedProviderOutput(_) | Self::SchemaViolation(_) => {
                "The AI service returned an unusable response"
            }
            Self::ContentRejected(_) => "The AI service declined to analyze this content",
            Self::ProviderError(_) => "The AI service is currently unavailable",
        }
    }

    /// True when the input, not the service, caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ContentRejected(_))
    }
}

/// Compares a CV against a job description.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(
        &self,
        cv_text: &str,
        job_description_text: &str,
    ) -> Result<StructuredAnalysis, AnalysisError>;
}

/// Model-backed [`Analyzer`]. The system instruction, schema included, is built once.
pub struct AnalysisInvoker {
    llm: LlmClient,
    system_instruction: String,
}

impl AnalysisInvoker {
    pub fn new(llm: LlmClient) -> Result<Self, serde_json::Error> {
        let schema = serde_json::to_string_pretty(&analysis_json_schema())?;
        let system_instruction = ANALYSIS_SYSTEM_TEMPLATE
            .replace("{schema}", &schema)
            .replace("{json_only}", JSON_ONLY_SYSTEM);
        Ok(Self {
            llm,
            system_instruction,
        })
    }
}

#[async_trait]
impl Analyzer for AnalysisInvoker {
    async fn analyze(
        &self,
        cv_text: &str,
        job_description_text: &str,
    ) -> Result<StructuredAnalysis, AnalysisError> {
        let prompt = build_user_prompt(cv_text, job_description_text);
        debug!(prompt_chars = prompt.len(), "Requesting CV analysis");

        let response = self
            .llm
            .call(&prompt, &self.system_instruction, ANALYSIS_TEMPERATURE)
            .await
            .map_err(classify)?;

        let analysis = interpret(response.text().unwrap_or_default())?;
        info!(
            matching = analysis.gap_analysis.matching_skills.len(),
            missing = analysis.gap_analysis.missing_skills.len(),
            suggestions = analysis.suggestions.len(),
            "CV analysis received"
        );
        Ok(analysis)
    }
}

/// Each text is inserted exactly once; placeholders typed by users stay literal.
fn build_user_prompt(cv_text: &str, job_description_text: &str) -> String {
    let fill = |part: &str| part.replace("{job_description_text}", job_description_text);
    match ANALYSIS_USER_TEMPLATE.split_once("{cv_text}") {
        Some((head, tail)) => format!("{}{cv_text}{}", fill(head), fill(tail)),
        None => fill(ANALYSIS_USER_TEMPLATE),
    }
}

/// Validates the raw model reply against the analysis schema.
pub(crate) fn interpret(raw: &str) -> Result<StructuredAnalysis, AnalysisError> {
    let body = strip_json_fences(raw);
    if body.is_empty() {
        return Err(AnalysisError::MalformedProviderOutput(
            "empty response".to_string(),
        ));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedProviderOutput(e.to_string()))?;
    let analysis: StructuredAnalysis = serde_json::from_value(value)
        .map_err(|e| AnalysisError::SchemaViolation(e.to_string()))?;

    if analysis.cover_letter_draft.trim().is_empty() {
        return Err(AnalysisError::SchemaViolation(
            "cover_letter_draft is blank".to_string(),
        ));
    }
    Ok(analysis)
}

fn classify(err: LlmError) -> AnalysisError {
    match err {
        LlmError::Refused => AnalysisError::ContentRejected("model refused the request".to_string()),
        LlmError::Api { status, message } if status < 500 && mentions_policy(&message) => {
            AnalysisError::ContentRejected(message)
        }
        other => AnalysisError::ProviderError(other.to_string()),
    }
}

fn mentions_policy(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("safety") || lower.contains("content policy") || lower.contains("usage policy")
}
