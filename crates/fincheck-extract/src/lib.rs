//! Upload staging and document text extraction.
//!
//! An upload is written to a uniquely named temporary file inside the upload
//! directory ([`StagedUpload`]), read back as a PDF, and removed when the
//! guard is dropped, whether or not extraction succeeded.

pub mod error;
pub mod pdf;
pub mod staging;

pub use error::ExtractError;
pub use pdf::{extract_pdf_text, extract_pdf_text_blocking};
pub use staging::{has_pdf_extension, StagedUpload};
