use thiserror::Error;

/// Errors returned by the analysis client.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Gemini API answered with a non-2xx status.
    #[error("Gemini API error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The API call succeeded but carried no candidate text.
    #[error("Gemini API returned no text: {0}")]
    EmptyResponse(String),

    /// The model's text is not a JSON object with the expected keys.
    #[error("model response is not a valid analysis: {reason}")]
    MalformedResponse { reason: String, raw: String },

    /// The configured base URL could not be parsed.
    #[error("invalid Gemini base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl AnalyzerError {
    /// `true` when the remote call worked but its answer could not be parsed.
    #[must_use]
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}
