//! `analyze <path>`: the upload pipeline run against a file on disk.

use std::path::Path;

use anyhow::Context;
use fincheck_analyzer::GeminiClient;
use fincheck_core::AnalysisRecord;

/// Extract, analyze and store one PDF already on disk.
///
/// The file is read in place; there is no staging copy. Nothing is stored
/// unless every step succeeds.
///
/// # Errors
///
/// Returns an error if the file cannot be read as a PDF, the model call or
/// its answer fails, or the insert fails.
pub(crate) async fn analyze_file(
    pool: &sqlx::SqlitePool,
    client: &GeminiClient,
    path: &Path,
) -> anyhow::Result<AnalysisRecord> {
    if !fincheck_extract::has_pdf_extension(&path.to_string_lossy()) {
        tracing::warn!(path = %path.display(), "file does not have a .pdf extension; reading it as PDF anyway");
    }

    let text = fincheck_extract::extract_pdf_text_blocking(path.to_path_buf())
        .await
        .with_context(|| format!("failed to extract text from {}", path.display()))?;
    if text.trim().is_empty() {
        tracing::warn!(path = %path.display(), "no text extracted from document");
    }
    tracing::info!(path = %path.display(), chars = text.chars().count(), "text extracted");

    let analysis = client
        .analyze(&text)
        .await
        .context("document analysis failed")?;

    let record = fincheck_db::insert_analysis(pool, &analysis).await?;
    tracing::info!(id = record.id, company = %record.company_name, "analysis saved");
    Ok(record)
}

/// Run [`analyze_file`] with the configured model and print the stored
/// record as JSON.
///
/// # Errors
///
/// Returns an error if the client cannot be built or [`analyze_file`] fails.
pub(crate) async fn run_analyze(
    pool: &sqlx::SqlitePool,
    config: &fincheck_core::AppConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let client = GeminiClient::with_base_url(
        &config.gemini_api_key,
        &config.gemini_model,
        &config.gemini_base_url,
    )?;
    let record = analyze_file(pool, &client, path).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Every stored analysis as pretty JSON, newest first, in the `/results` shape.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn render_results(pool: &sqlx::SqlitePool) -> anyhow::Result<String> {
    let records = fincheck_db::list_analyses(pool).await?;
    Ok(serde_json::to_string_pretty(&records)?)
}
