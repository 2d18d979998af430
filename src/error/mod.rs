use thiserror::Error;

/// Error types for the atscore crate.
///
/// Every failure an analysis can hit is a variant here, so callers can match
/// on the kind rather than inspect message strings. Variants fall into two
/// classes: transient failures that the retry loop may attempt again
/// (`Api` with a rate-limit or server status, `Timeout`, `Http`), and
/// terminal failures that end the analysis immediately (everything else).
#[derive(Error, Debug)]
pub enum AtsError {
    /// A required credential environment variable is not set.
    /// Fatal for the whole analysis; reported before any API call is made.
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// The resume PDF yielded no usable text (or could not be read at all).
    /// Reported before any prompt is built.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The LLM API returned a structured error response.
    /// Transient when the status is 429 or a 5xx; terminal otherwise.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Every attempt failed with a transient error and the retry budget ran out.
    #[error("API failed after {attempts} attempts: {last_error}")]
    ApiExhausted { attempts: usize, last_error: String },

    /// The model's output failed to parse or validate against the report
    /// schema. Never retried: the cause is a contract violation by the
    /// model, not a transient fault.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The HTTP request timed out.
    #[error("Timeout error")]
    Timeout,

    /// Transport-level failure (from reqwest).
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Anything that doesn't fit the categories above.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AtsError {
    /// Whether this failure is worth retrying.
    ///
    /// Rate limiting (429), server errors (5xx), timeouts, and transport
    /// failures are expected to potentially succeed on a later attempt.
    /// Everything else is a terminal contract or configuration problem.
    pub fn is_transient(&self) -> bool {
        match self {
            AtsError::Api { status, .. } => *status == 429 || *status >= 500,
            AtsError::Timeout | AtsError::Http(_) => true,
            _ => false,
        }
    }
}

// Manual implementation of PartialEq for AtsError.
// The Http variant is always considered unequal because reqwest::Error
// doesn't implement PartialEq.
impl PartialEq for AtsError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingCredential(a), Self::MissingCredential(b)) => a == b,
            (Self::Extraction(a), Self::Extraction(b)) => a == b,
            (
                Self::Api {
                    status: s1,
                    message: m1,
                },
                Self::Api {
                    status: s2,
                    message: m2,
                },
            ) => s1 == s2 && m1 == m2,
            (
                Self::ApiExhausted {
                    attempts: a1,
                    last_error: e1,
                },
                Self::ApiExhausted {
                    attempts: a2,
                    last_error: e2,
                },
            ) => a1 == a2 && e1 == e2,
            (Self::SchemaViolation(a), Self::SchemaViolation(b)) => a == b,
            (Self::Timeout, Self::Timeout) => true,
            (Self::Unexpected(a), Self::Unexpected(b)) => a == b,
            (Self::Http(_), Self::Http(_)) => false,
            _ => false,
        }
    }
}

/// A specialized Result type for atscore operations.
pub type Result<T> = std::result::Result<T, AtsError>;
