//! The retrying, schema-validated analysis call.
//!
//! [`Analyzer`] owns the one outbound LLM interaction per submission:
//! compose the prompt, submit it with the report schema attached, retry
//! transient API failures with exponential backoff, and parse/validate the
//! raw reply into an [`AnalysisReport`]. Exactly one report or one error
//! comes out of every call.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::backend::LlmBackend;
use crate::backend::utils::extract_json_from_markdown;
use crate::error::{AtsError, Result};
use crate::prompt;
use crate::report::{AnalysisReport, AnalysisRequest};
use crate::schema::SchemaType;

/// Default number of attempts before giving up on transient failures.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Executes analysis requests against an [`LlmBackend`] with bounded retry.
pub struct Analyzer<B> {
    backend: B,
    max_retries: usize,
}

impl<B: LlmBackend> Analyzer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of attempts (minimum 1).
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Analyze a resume against a job description.
    ///
    /// Transient API failures (rate limits, server errors, transport
    /// failures) are retried up to the attempt budget, sleeping 1s, then 2s,
    /// doubling between attempts; exhaustion returns
    /// [`AtsError::ApiExhausted`] carrying the last failure. A reply that
    /// arrives but fails schema validation returns
    /// [`AtsError::SchemaViolation`] immediately: the model broke its output
    /// contract and re-asking is not expected to help. Any other error also
    /// ends the call immediately.
    #[instrument(
        name = "analyze",
        skip(self, request),
        fields(
            resume_len = request.resume_text.len(),
            jd_len = request.jd_text.len()
        )
    )]
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        let user = prompt::user_message(request);
        let schema = AnalysisReport::schema();

        let mut last_error: Option<AtsError> = None;

        for attempt in 1..=self.max_retries {
            if attempt > 1 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(1 << (attempt - 2));
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Transient API failure, backing off before retry"
                );
                sleep(delay).await;
            }

            debug!(attempt, total = self.max_retries, "Analysis attempt");

            match self
                .backend
                .submit(prompt::SYSTEM_INSTRUCTION, &user, &schema)
                .await
            {
                Ok(raw) => {
                    let report = parse_report(&raw)?;
                    info!(attempt, score = report.score, "Analysis succeeded");
                    return Ok(report);
                }
                Err(err) if err.is_transient() => {
                    debug!(attempt, error = %err, "Attempt failed with transient error");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        let last_error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts were made".to_string());
        warn!(
            attempts = self.max_retries,
            last_error = %last_error,
            "Retry budget exhausted"
        );
        Err(AtsError::ApiExhausted {
            attempts: self.max_retries,
            last_error,
        })
    }
}

/// Parse and validate a raw model reply into an [`AnalysisReport`].
///
/// All-or-nothing: malformed JSON, a missing or mistyped field, or an
/// out-of-range score all reject the whole reply.
fn parse_report(raw: &str) -> Result<AnalysisReport> {
    let json = extract_json_from_markdown(raw);
    let report: AnalysisReport = serde_json::from_str(&json).map_err(|e| {
        AtsError::SchemaViolation(format!("model output did not match the report schema: {e}"))
    })?;
    report.validate()?;
    Ok(report)
}
