use reqwest::Response;
use tracing::error;

use crate::error::{AtsError, Result};

/// Extract JSON from markdown code blocks if present, otherwise return the
/// content as-is.
///
/// Gemini is asked for `application/json` output, but models occasionally
/// wrap the reply in ```json ... ``` fences anyway.
pub fn extract_json_from_markdown(content: &str) -> String {
    let trimmed = content.trim();

    // Match ```json ... ``` or ``` ... ```
    if trimmed.starts_with("```") {
        if let Some(start_idx) = trimmed.find('\n') {
            let after_start = &trimmed[start_idx + 1..];
            if let Some(end_idx) = after_start.rfind("```") {
                return after_start[..end_idx].trim().to_string();
            }
        }
    }

    trimmed.to_string()
}

/// Convert a reqwest error to an AtsError, handling timeouts specially.
pub fn handle_http_error(e: reqwest::Error) -> AtsError {
    error!(error = %e, "HTTP request to Gemini failed");
    if e.is_timeout() {
        AtsError::Timeout
    } else {
        AtsError::Http(e)
    }
}

/// Check the HTTP response status and turn an unsuccessful response into an
/// [`AtsError::Api`] carrying the status code and the error body.
///
/// The status code is what lets the retry loop classify the failure: 429 and
/// 5xx are transient, everything else is terminal.
pub async fn check_response_status(response: Response) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        error!(
            status = %status,
            error = %error_text,
            "Gemini API returned error response"
        );
        return Err(AtsError::Api {
            status: status.as_u16(),
            message: error_text,
        });
    }
    Ok(response)
}
