use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The upload could not be written to, or read from, temporary storage.
    #[error("temporary storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored file is not a readable PDF.
    #[error("failed to read PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The PDF parsed but contains no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The blocking extraction task panicked or was cancelled.
    #[error("extraction task failed: {0}")]
    Task(String),
}
