use fincheck_core::NewAnalysis;

use crate::AnalyzerError;

/// Remove Markdown JSON code-fence markers and surrounding whitespace.
///
/// Every literal "```json" and "```" is removed wherever it appears, then the
/// result is trimmed.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the model's raw answer into the four analysis fields.
///
/// # Errors
///
/// Returns [`AnalyzerError::MalformedResponse`] if, after fence stripping, the
/// text is not JSON, or is JSON that lacks one of the expected keys or holds
/// a non-string value for one.
pub fn parse_analysis(raw: &str) -> Result<NewAnalysis, AnalyzerError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str::<NewAnalysis>(&cleaned).map_err(|e| AnalyzerError::MalformedResponse {
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}
