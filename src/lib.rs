//! atscore: schema-validated ATS resume scoring via the Gemini API
//!
//! # Overview
//!
//! atscore takes a resume PDF and a job-description text, extracts the
//! resume text, and asks the Gemini API for a structured ATS compatibility
//! report: a 0-100 score, a summary, and three feedback sections. The reply
//! is requested against a JSON schema and validated all-or-nothing; transient
//! API failures are retried with exponential backoff.
//!
//! Key pieces:
//! - [`Analyzer`]: the retrying, schema-validated analysis call
//! - [`GeminiClient`]: the Gemini backend (construct once, reuse)
//! - [`LlmBackend`]: the backend seam, swappable for testing
//! - [`AnalysisReport`]: the validated result handed to presentation
//!
//! # Quick Start
//!
//! ```no_run
//! use atscore::{AnalysisRequest, Analyzer, GeminiClient};
//!
//! #[tokio::main]
//! async fn main() -> atscore::Result<()> {
//!     let client = GeminiClient::from_env()?;
//!     let analyzer = Analyzer::new(client);
//!
//!     let request = AnalysisRequest {
//!         resume_text: "...extracted resume text...".to_string(),
//!         jd_text: "...job description...".to_string(),
//!     };
//!
//!     let report = analyzer.analyze(&request).await?;
//!     println!("score: {}/100", report.score);
//!     println!("{}", report.summary);
//!     Ok(())
//! }
//! ```

pub mod analyzer;
mod backend;
mod error;
pub mod extract;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod schema;

// Re-exports for convenience
pub use analyzer::Analyzer;
pub use backend::{GeminiClient, GeminiModel, LlmBackend};
pub use error::{AtsError, Result};
pub use report::{AnalysisReport, AnalysisRequest, FeedbackSection};
pub use schema::{Schema, SchemaBuilder, SchemaType};
