//! `POST /upload`: stage the file, extract its text, analyze it, store the result.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use fincheck_analyzer::AnalyzerError;
use fincheck_core::AnalysisRecord;
use fincheck_db::DbError;
use fincheck_extract::{ExtractError, StagedUpload};
use serde::Serialize;
use thiserror::Error;

use super::{AppState, ErrorBody};

const FILE_FIELD: &str = "file";
const DEFAULT_FILENAME: &str = "upload.pdf";

#[derive(Debug, Serialize)]
pub(super) struct UploadResponse {
    pub message: &'static str,
}

/// Failure of one upload request.
///
/// Nothing is stored unless every stage succeeds.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingInput,

    #[error("{message}")]
    InvalidForm { status: StatusCode, message: String },

    #[error("failed to extract document text: {0}")]
    Extraction(#[from] ExtractError),

    #[error("{0}")]
    RemoteService(AnalyzerError),

    #[error("{0}")]
    MalformedResponse(AnalyzerError),

    #[error("failed to save analysis: {0}")]
    Persistence(#[from] DbError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorKind {
    MissingInput,
    InvalidForm,
    Extraction,
    RemoteService,
    MalformedResponse,
    Persistence,
}

impl From<AnalyzerError> for UploadError {
    fn from(error: AnalyzerError) -> Self {
        if error.is_malformed_response() {
            Self::MalformedResponse(error)
        } else {
            Self::RemoteService(error)
        }
    }
}

impl UploadError {
    #[must_use]
    pub fn kind(&self) -> UploadErrorKind {
        match self {
            Self::MissingInput => UploadErrorKind::MissingInput,
            Self::InvalidForm { .. } => UploadErrorKind::InvalidForm,
            Self::Extraction(_) => UploadErrorKind::Extraction,
            Self::RemoteService(_) => UploadErrorKind::RemoteService,
            Self::MalformedResponse(_) => UploadErrorKind::MalformedResponse,
            Self::Persistence(_) => UploadErrorKind::Persistence,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput => StatusCode::BAD_REQUEST,
            Self::InvalidForm { status, .. } => *status,
            Self::Extraction(_)
            | Self::RemoteService(_)
            | Self::MalformedResponse(_)
            | Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                Self::MalformedResponse(AnalyzerError::MalformedResponse { reason, raw }) => {
                    tracing::error!(kind = ?self.kind(), reason = %reason, raw = %raw, "upload failed");
                }
                _ => tracing::error!(kind = ?self.kind(), error = ?self, "upload failed"),
            }
        } else {
            tracing::warn!(kind = ?self.kind(), error = %self, "upload rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// The `file` field of the upload form.
struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

pub(super) async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "request is not a multipart form");
        UploadError::MissingInput
    })?;
    let file = read_file_field(multipart).await?;

    process_document(&state, &file.filename, &file.bytes).await?;

    Ok(Json(UploadResponse {
        message: "Document analyzed and saved",
    }))
}

/// Pull the `file` field out of the form, skipping any other fields.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, UploadError> {
    let form_error = |e: axum::extract::multipart::MultipartError| UploadError::InvalidForm {
        status: e.status(),
        message: format!("Failed to read form field: {}", e.body_text()),
    };

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned);
        let bytes = field.bytes().await.map_err(form_error)?.to_vec();

        // Browsers send an unnamed, empty part when no file was chosen.
        if filename.is_none() && bytes.is_empty() {
            return Err(UploadError::MissingInput);
        }

        return Ok(UploadedFile {
            filename: filename.unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
            bytes,
        });
    }

    Err(UploadError::MissingInput)
}

/// Run one document through extraction, analysis and storage.
///
/// The staged file is removed before the model is called; a failure at any
/// stage leaves the store untouched.
pub(super) async fn process_document(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> Result<AnalysisRecord, UploadError> {
    if !fincheck_extract::has_pdf_extension(filename) {
        tracing::warn!(filename, "upload does not have a .pdf extension; reading it as PDF anyway");
    }

    let staged = StagedUpload::stage(&state.upload_dir, filename, bytes)?;
    tracing::info!(filename, bytes = bytes.len(), "upload staged");

    let text = fincheck_extract::extract_pdf_text_blocking(staged.path_buf()).await?;
    drop(staged);

    if text.trim().is_empty() {
        tracing::warn!(filename, "no text extracted from document");
    }
    tracing::debug!(preview = %preview(&text), "extracted text");

    let analysis = state.analyzer.analyze(&text).await?;
    let record = fincheck_db::insert_analysis(&state.pool, &analysis).await?;

    tracing::info!(
        id = record.id,
        company = %record.company_name,
        verdict = %record.verdict,
        "document analyzed and saved"
    );
    Ok(record)
}

fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 100;
    text.chars().take(PREVIEW_CHARS).collect()
}
