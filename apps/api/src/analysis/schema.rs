use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The structured result of comparing one CV against one job description.
/// Every field is required; the provider's output is rejected if any is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    pub job_keywords: KeywordSet,
    pub cv_keywords: KeywordSet,
    pub gap_analysis: GapAnalysis,
    pub suggestions: Vec<Suggestion>,
    pub cover_letter_draft: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub detail: String,
    pub example: String,
}

fn keyword_set(owner: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "hard_skills": {
                "type": "array",
                "items": { "type": "string" },
                "description": format!("Technical skills, tools and technologies found in the {owner}.")
            },
            "soft_skills": {
                "type": "array",
                "items": { "type": "string" },
                "description": format!("Interpersonal and behavioural skills found in the {owner}.")
            }
        },
        "required": ["hard_skills", "soft_skills"]
    })
}

/// JSON Schema the provider is instructed to follow. Mirrors [`StructuredAnalysis`].
pub fn analysis_json_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "job_keywords": keyword_set("job description"),
            "cv_keywords": keyword_set("CV"),
            "gap_analysis": {
                "type": "object",
                "properties": {
                    "matching_skills": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Skills required by the job that the CV demonstrates."
                    },
                    "missing_skills": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Skills required by the job that the CV lacks."
                    }
                },
                "required": ["matching_skills", "missing_skills"]
            },
            "suggestions": {
                "type": "array",
                "description": "Concrete, actionable edits to the CV that close the gaps.",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "detail": { "type": "string" },
                        "example": {
                            "type": "string",
                            "description": "A rewritten CV line showing the suggestion applied."
                        }
                    },
                    "required": ["title", "detail", "example"]
                }
            },
            "cover_letter_draft": {
                "type": "string",
                "description": "A short, professional cover letter tailored to the job."
            }
        },
        "required": ["job_keywords", "cv_keywords", "gap_analysis", "suggestions", "cover_letter_draft"]
    })
}
