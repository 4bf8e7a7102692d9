//! HTTP client for the Gemini `generateContent` API.
//!
//! One call per document: no retry, no caching, no request timeout. A hung
//! remote call holds the caller for as long as it hangs.

use fincheck_core::NewAnalysis;
use reqwest::{Client, Url};

use crate::error::AnalyzerError;
use crate::prompt::build_prompt;
use crate::response::parse_analysis;
use crate::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str) -> Result<Self, AnalyzerError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AnalyzerError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        base_url: &str,
    ) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .user_agent("fincheck/0.1 (document-analysis)")
            .build()?;

        // Exactly one trailing slash, so join appends rather than replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("v1beta/models/{model}:generateContent")))
            .map_err(|e| AnalyzerError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Analyze a document's extracted text.
    ///
    /// Builds the analyst prompt, calls the model once and parses its answer.
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::Http`], [`AnalyzerError::Remote`] or
    ///   [`AnalyzerError::EmptyResponse`] if the remote call fails.
    /// - [`AnalyzerError::MalformedResponse`] if the answer is not a JSON
    ///   object with the four expected keys.
    pub async fn analyze(&self, text: &str) -> Result<NewAnalysis, AnalyzerError> {
        let prompt = build_prompt(text);
        let raw = self.generate(&prompt).await?;
        tracing::debug!(raw = %raw, "model response received");

        let analysis = parse_analysis(&raw)?;
        tracing::info!(
            company = %analysis.company_name,
            verdict = %analysis.verdict,
            date = %analysis.date,
            "model response parsed"
        );
        Ok(analysis)
    }

    /// Send one prompt and return the model's text answer.
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::Http`] on network failure or an undecodable body.
    /// - [`AnalyzerError::Remote`] on a non-2xx status.
    /// - [`AnalyzerError::EmptyResponse`] if no candidate text came back.
    pub async fn generate(&self, prompt: &str) -> Result<String, AnalyzerError> {
        tracing::info!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "calling Gemini generateContent"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            tracing::error!(status = %status, message = %message, "Gemini API request failed");
            return Err(AnalyzerError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.text()
            .ok_or_else(|| AnalyzerError::EmptyResponse(body.empty_reason()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_targets_model_generate_content() {
        let client = GeminiClient::new("k", "gemini-1.5-flash").expect("client");
        assert_eq!(
            client.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn base_url_without_trailing_slash_keeps_its_path() {
        let client =
            GeminiClient::with_base_url("k", "m", "http://127.0.0.1:8080/proxy").expect("client");
        assert_eq!(
            client.endpoint().as_str(),
            "http://127.0.0.1:8080/proxy/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = GeminiClient::with_base_url("k", "m", "not a url").unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidBaseUrl { .. }), "got {err:?}");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let client = GeminiClient::new("very-secret", "m").expect("client");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("very-secret"));
    }
}
