/// Build the analyst prompt for a document's extracted text.
///
/// The text is embedded verbatim after the `Content:` marker.
#[must_use]
pub fn build_prompt(text: &str) -> String {
    format!(
        "You are a financial analyst. Analyze this content and respond with only a JSON object \
         using exactly these keys:\n\
         {{\n\
         \"Company Name\": \"...\",\n\
         \"Description\": \"...\",\n\
         \"Verdict\": \"Positive or Negative\",\n\
         \"Date\": \"YYYY-MM-DD\"\n\
         }}\n\
         Content:\n\
         {text}\n"
    )
}
