use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::ExtractError;

/// An uploaded file written to temporary storage.
///
/// The file name is generated per upload, so concurrent uploads that share an
/// original filename never touch the same path. The file is deleted when this
/// value is dropped.
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
    original_name: String,
}

impl StagedUpload {
    /// Write `bytes` to a fresh file under `dir`.
    ///
    /// The generated name keeps the extension of `original_name` (if any) so
    /// the file is recognisable on disk while it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Io`] if the file cannot be created or written.
    pub fn stage(dir: &Path, original_name: &str, bytes: &[u8]) -> Result<Self, ExtractError> {
        let suffix = extension_of(original_name)
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        tracing::debug!(
            original_name,
            path = %file.path().display(),
            bytes = bytes.len(),
            "upload staged"
        );

        Ok(Self {
            file,
            original_name: original_name.to_owned(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[must_use]
    pub fn path_buf(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }
}

/// Extension sniffing only: `true` when the filename ends in `.pdf`
/// (case-insensitive).
#[must_use]
pub fn has_pdf_extension(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn extension_of(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}
