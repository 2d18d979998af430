use async_trait::async_trait;

use crate::error::Result;
use crate::schema::Schema;

/// LlmBackend is the seam between the retry loop and a concrete LLM API.
///
/// One method, one outbound request: submit a system instruction, a user
/// message, and the response schema the reply must conform to, and get back
/// the raw text the model produced. The backend does not parse or validate
/// that text, and it does not retry; both belong to
/// [`Analyzer`](crate::Analyzer), which owns attempt accounting and failure
/// classification.
///
/// The crate ships [`GeminiClient`](crate::GeminiClient) as the production
/// implementation; tests substitute scripted fakes.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Submit a single structured-output request and return the raw reply text.
    ///
    /// Errors must be classified: an API-level error response becomes
    /// [`AtsError::Api`](crate::AtsError::Api) carrying the HTTP status, so
    /// the caller can distinguish transient failures from terminal ones.
    async fn submit(&self, system: &str, user: &str, schema: &Schema) -> Result<String>;
}
