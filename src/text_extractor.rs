use crate::error::ProcessingError;
use lopdf::Document;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};

/// Source of the raw text of one PDF
///
/// The pipeline only needs page text concatenated in page order, so this is
/// the seam between the parsing logic and whichever PDF backend is available.
pub trait TextSource {
    fn extract_text(&self, path: &Path) -> Result<String, ProcessingError>;
}

/// Text extraction component backed by pdfium, falling back to lopdf
///
/// pdfium is loaded dynamically; when no shared library can be bound the
/// extractor runs on lopdf's pure-Rust text extraction instead.
pub struct PdfTextExtractor {
    pdfium: Option<Pdfium>,
}

impl PdfTextExtractor {
    /// Try to bind pdfium from `library_dir`, `./`, `../`, then the system library
    pub fn new(library_dir: Option<&Path>) -> Self {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(dir) = library_dir {
            candidates.push(dir.to_path_buf());
        }
        candidates.push(PathBuf::from("./"));
        candidates.push(PathBuf::from("../"));

        let bindings = candidates
            .iter()
            .find_map(|dir| {
                match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)) {
                    Ok(bindings) => {
                        info!("Loaded pdfium from {}", dir.display());
                        Some(bindings)
                    }
                    Err(e) => {
                        debug!("Failed to load pdfium from {}: {}", dir.display(), e);
                        None
                    }
                }
            })
            .or_else(|| match Pdfium::bind_to_system_library() {
                Ok(bindings) => {
                    info!("Loaded system pdfium library");
                    Some(bindings)
                }
                Err(e) => {
                    info!("pdfium unavailable ({}), using lopdf text extraction", e);
                    None
                }
            });

        Self {
            pdfium: bindings.map(Pdfium::new),
        }
    }

    /// Extractor that never binds pdfium
    pub fn lopdf_only() -> Self {
        Self { pdfium: None }
    }

    pub fn backend_name(&self) -> &'static str {
        if self.pdfium.is_some() { "pdfium" } else { "lopdf" }
    }

    fn extract_with_pdfium(&self, pdfium: &Pdfium, path: &Path) -> Result<String, ProcessingError> {
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ProcessingError::PdfLoadError(format!("Failed to load {}: {}", path.display(), e)))?;

        let mut text = String::new();
        for (page_index, page) in document.pages().iter().enumerate() {
            let page_text = page
                .text()
                .map_err(|e| ProcessingError::TextExtractionError {
                    page: page_index + 1,
                    error: format!("pdfium extraction failed: {}", e),
                })?
                .all();
            push_page(&mut text, &page_text);
        }
        Ok(text)
    }

    fn extract_with_lopdf(&self, path: &Path) -> Result<String, ProcessingError> {
        let document = Document::load(path)
            .map_err(|e| ProcessingError::PdfLoadError(format!("Failed to load {}: {}", path.display(), e)))?;

        if document.is_encrypted() {
            return Err(ProcessingError::PdfLoadError(format!("{} is encrypted", path.display())));
        }

        let mut text = String::new();
        for page_number in document.get_pages().into_keys() {
            let page_text = document
                .extract_text(&[page_number])
                .map_err(|e| ProcessingError::TextExtractionError {
                    page: page_number as usize,
                    error: format!("lopdf extraction failed: {}", e),
                })?;
            push_page(&mut text, &page_text);
        }
        Ok(text)
    }
}

impl TextSource for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ProcessingError> {
        debug!("Extracting text from {} with {}", path.display(), self.backend_name());

        let text = match &self.pdfium {
            Some(pdfium) => self.extract_with_pdfium(pdfium, path)?,
            None => self.extract_with_lopdf(path)?,
        };

        if text.trim().is_empty() {
            warn!("{} contains no extractable text", path.display());
        }
        Ok(text)
    }
}

/// Append one page, keeping its last line from merging into the next page
fn push_page(text: &mut String, page_text: &str) {
    text.push_str(page_text);
    if !page_text.ends_with('\n') {
        text.push('\n');
    }
}
