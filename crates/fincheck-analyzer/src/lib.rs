//! Analysis client for uploaded financial documents.
//!
//! Wraps the extracted document text in a fixed analyst prompt, sends it to
//! the Gemini `generateContent` endpoint, and parses the model's answer into
//! a [`NewAnalysis`](fincheck_core::NewAnalysis).

pub mod client;
pub mod error;
pub mod prompt;
pub mod response;

mod types;

pub use client::GeminiClient;
pub use error::AnalyzerError;
pub use prompt::build_prompt;
pub use response::{parse_analysis, strip_code_fences};
