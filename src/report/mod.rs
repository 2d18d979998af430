//! Data model for one resume analysis: the request going in and the
//! structured report coming back.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AtsError, Result};
use crate::schema::{Schema, SchemaBuilder, SchemaType};

/// One user submission: the extracted resume text plus the target job
/// description.
///
/// Both fields must be non-empty. The prompt layer does not enforce this;
/// callers are expected to reject blank input before constructing a request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub jd_text: String,
}

/// Detailed feedback sections for resume improvement.
///
/// Field names are camelCase on the wire to match the schema handed to the
/// model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSection {
    /// Feedback on missing and used keywords from the job description.
    pub keyword_match: String,
    /// Feedback on action verbs, quantified results, and professional impact.
    pub content_impact: String,
    /// Feedback on parsability, section headings, and layout issues.
    pub formatting_and_structure: String,
}

/// The final structured ATS analysis report.
///
/// Produced only by successful schema validation of the model's raw output.
/// Construction is all-or-nothing: a reply missing any field never yields a
/// partial report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisReport {
    /// ATS compatibility score from 0 to 100, higher is better.
    pub score: i64,
    /// A brief summary of the analysis results.
    pub summary: String,
    /// Structured, detailed feedback for improvement.
    pub feedback: FeedbackSection,
}

impl AnalysisReport {
    /// Validation beyond what deserialization checks.
    ///
    /// A score outside 0..=100 breaks the contract given to the model and is
    /// rejected as a schema violation rather than clamped or passed through.
    pub fn validate(&self) -> Result<()> {
        if !(0..=100).contains(&self.score) {
            return Err(AtsError::SchemaViolation(format!(
                "score must be between 0 and 100, got {}",
                self.score
            )));
        }
        Ok(())
    }
}

impl SchemaType for AnalysisReport {
    fn schema() -> Schema {
        let feedback = SchemaBuilder::object()
            .description("Structured, detailed feedback for improvement.")
            .property(
                "keywordMatch",
                json!({
                    "type": "string",
                    "description": "Actionable feedback on missing and used keywords from the Job Description and overall relevance."
                }),
                true,
            )
            .property(
                "contentImpact",
                json!({
                    "type": "string",
                    "description": "Actionable feedback on utilizing strong action verbs, quantifying results, and overall professional impact."
                }),
                true,
            )
            .property(
                "formattingAndStructure",
                json!({
                    "type": "string",
                    "description": "Actionable feedback on resume parsability, standard section headings, and layout/structure issues that might confuse an ATS."
                }),
                true,
            )
            .build();

        SchemaBuilder::object()
            .title("AnalysisReport")
            .description("The final structured ATS analysis report.")
            .property(
                "score",
                json!({
                    "type": "integer",
                    "description": "The ATS compatibility score from 0 to 100, where higher is better."
                }),
                true,
            )
            .property(
                "summary",
                json!({
                    "type": "string",
                    "description": "A brief, encouraging summary of the analysis results."
                }),
                true,
            )
            .property("feedback", feedback.schema, true)
            .build()
    }

    fn schema_name() -> Option<String> {
        Some("AnalysisReport".to_string())
    }
}
