pub mod client;
pub mod gemini;
pub(crate) mod utils;

pub use client::LlmBackend;
pub use gemini::{GeminiClient, Model as GeminiModel};
