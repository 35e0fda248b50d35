use thiserror::Error;

/// Custom error types for the complaint extraction pipeline
///
/// Archive errors abort a run; PDF errors are scoped to a single file
/// and end up in the extraction report instead.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Archive extraction failed: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("PDF loading failed: {0}")]
    PdfLoadError(String),

    #[error("Text extraction failed on page {page}: {error}")]
    TextExtractionError { page: usize, error: String },

    #[error("PDF extraction panicked: {0}")]
    ExtractionPanic(String),

    #[error("Spreadsheet export failed: {0}")]
    ExportError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
