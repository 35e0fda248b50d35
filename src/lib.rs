//! Complaint extraction from platform PDF exports
//!
//! Pipeline:
//! 1. Unpack the PDFs from a `.zip` into a scoped temporary directory
//! 2. Extract the text of every page (pdfium, or lopdf as fallback)
//! 3. Drop boilerplate lines (headers, page counters, UI labels)
//! 4. Split the cleaned text into one block per `ID:` marker
//! 5. Pull ID, name, timestamp, channel, location and description from each block
//! 6. Render the records as a table or JSON and export them as xlsx

pub mod archive;
pub mod error;
pub mod export;
pub mod field_extractor;
pub mod noise_filter;
pub mod pdf_processor;
pub mod record;
pub mod segmenter;
pub mod text_extractor;

pub use archive::{UnpackedArchive, unpack_pdfs};
pub use error::ProcessingError;
pub use export::{EXPORT_FILE_NAME, ExportArtifact, XLSX_MIME_TYPE, build_spreadsheet, render_json, render_table};
pub use pdf_processor::ComplaintProcessor;
pub use record::{COLUMNS, ComplaintRecord, ExtractionReport, FileFailure};
pub use text_extractor::{PdfTextExtractor, TextSource};
