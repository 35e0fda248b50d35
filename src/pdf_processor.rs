use crate::error::ProcessingError;
use crate::field_extractor::FieldExtractor;
use crate::noise_filter::NoiseFilter;
use crate::record::{ComplaintRecord, ExtractionReport, FileFailure};
use crate::segmenter::BlockSegmenter;
use crate::text_extractor::TextSource;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use log::{error, info, warn};

/// Main processor that runs every PDF through the extraction pipeline
///
/// Pipeline per file:
/// 1. Pull raw page text from the `TextSource`
/// 2. Drop boilerplate lines
/// 3. Split into per-complaint blocks
/// 4. Extract fields from each block, keeping only blocks with an ID
pub struct ComplaintProcessor<S: TextSource> {
    source: S,
    noise_filter: NoiseFilter,
    segmenter: BlockSegmenter,
    field_extractor: FieldExtractor,
}

impl<S: TextSource> ComplaintProcessor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            noise_filter: NoiseFilter::new(),
            segmenter: BlockSegmenter::new(),
            field_extractor: FieldExtractor::new(),
        }
    }

    /// Parse already-extracted text into records attributed to `source_file`
    pub fn parse_text(&self, text: &str, source_file: &str) -> Vec<ComplaintRecord> {
        let cleaned = self.noise_filter.clean(text);
        self.segmenter
            .segment(&cleaned)
            .into_iter()
            .filter_map(|block| self.field_extractor.extract(block, source_file))
            .collect()
    }

    /// Process a single PDF; any failure means no records from this file
    pub fn process_file(&self, path: &Path) -> Result<Vec<ComplaintRecord>, ProcessingError> {
        info!("Processing PDF: {}", path.display());

        // PDF backends can panic on malformed input
        let text = panic::catch_unwind(AssertUnwindSafe(|| self.source.extract_text(path)))
            .map_err(|payload| ProcessingError::ExtractionPanic(panic_message(payload.as_ref())))??;
        let records = self.parse_text(&text, &file_name(path));

        info!("Extracted {} records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Process every file in order, isolating failures per file
    pub fn process_files<P: AsRef<Path>>(&self, paths: &[P]) -> ExtractionReport {
        let mut report = ExtractionReport {
            pdf_count: paths.len(),
            ..Default::default()
        };

        for path in paths {
            let path = path.as_ref();
            match self.process_file(path) {
                Ok(mut records) => report.records.append(&mut records),
                Err(e) => {
                    error!("Failed to process {}: {}", path.display(), e);
                    report.failures.push(FileFailure {
                        file_name: file_name(path),
                        message: e.to_string(),
                    });
                }
            }
        }

        if report.is_empty() {
            warn!("No records extracted from {} PDFs", report.pdf_count);
        } else {
            info!(
                "Processing complete: {} records from {} PDFs ({} failed)",
                report.records.len(),
                report.pdf_count,
                report.failures.len()
            );
        }
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "malformed document".to_string()
    }
}

/// Base name of `path`, as shown in the Arquivo column
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Serves canned text per path; paths without text fail to load
    struct FakeSource {
        texts: HashMap<PathBuf, String>,
    }

    impl FakeSource {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                texts: entries
                    .iter()
                    .map(|(path, text)| (PathBuf::from(path), text.to_string()))
                    .collect(),
            }
        }
    }

    impl TextSource for FakeSource {
        fn extract_text(&self, path: &Path) -> Result<String, ProcessingError> {
            if path.ends_with("panics.pdf") {
                panic!("corrupt xref table");
            }
            self.texts
                .get(path)
                .cloned()
                .ok_or_else(|| ProcessingError::PdfLoadError(format!("cannot open {}", path.display())))
        }
    }

    const TWO_RECORDS: &str = "https://www.reclameaqui.com.br/empresa/acme/\n\
        1/2\n\
        ID: 123456789\n\
        Produto chegou quebrado\n\
        Alice Smith\n\
        01/02/23 - 10:00\n\
        Via site\n\
        Sao Paulo, SP\n\
        Não respondida\n\
        18/10/2024, 14:05\n\
        ID: 987654321\n\
        Bob\n\
        05/05/22 - 09:30\n\
        Via app\n\
        Responder\n";

    #[test]
    fn test_parse_text_end_to_end() {
        let processor = ComplaintProcessor::new(FakeSource::new(&[]));
        let records = processor.parse_text(TWO_RECORDS, "acme.pdf");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "123456789");
        assert_eq!(records[0].description, "Produto chegou quebrado");
        assert_eq!(records[0].submitter_name.as_deref(), Some("Alice Smith"));
        assert_eq!(records[0].location.as_deref(), Some("Sao Paulo, SP"));
        assert_eq!(records[1].id, "987654321");
        assert_eq!(records[1].submitter_name.as_deref(), Some("Bob"));
        assert_eq!(records[1].channel.as_deref(), Some("Via app"));
        assert!(records.iter().all(|r| r.source_file == "acme.pdf"));
    }

    #[test]
    fn test_no_marker_yields_no_records() {
        let processor = ComplaintProcessor::new(FakeSource::new(&[]));
        let text = "Alice\n01/02/23 - 10:00\nVia site\nSao Paulo, SP\n";
        assert!(processor.parse_text(text, "x.pdf").is_empty());
        assert!(processor.parse_text("", "x.pdf").is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let processor = ComplaintProcessor::new(FakeSource::new(&[]));
        let text = "ID: 111111111\nA\nID: 111111111\nB";
        assert_eq!(processor.parse_text(text, "dup.pdf").len(), 2);
    }

    #[test]
    fn test_failed_file_is_isolated() {
        let source = FakeSource::new(&[("/in/good.pdf", TWO_RECORDS)]);
        let processor = ComplaintProcessor::new(source);

        let report = processor.process_files(&["/in/good.pdf", "/in/broken.pdf"]);

        assert_eq!(report.pdf_count, 2);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "broken.pdf");
        assert!(report.failures[0].message.contains("cannot open"));
        assert!(!report.is_empty());
    }

    #[test]
    fn test_panicking_file_is_isolated() {
        let source = FakeSource::new(&[("/in/good.pdf", TWO_RECORDS)]);
        let processor = ComplaintProcessor::new(source);

        let report = processor.process_files(&["/in/good.pdf", "/in/panics.pdf", "/in/good.pdf"]);

        assert_eq!(report.pdf_count, 3);
        assert_eq!(report.records.len(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "panics.pdf");
        assert!(report.failures[0].message.contains("corrupt xref table"));
    }

    #[test]
    fn test_records_follow_file_order() {
        let source = FakeSource::new(&[
            ("/in/b.pdf", "ID: 222222222\nX"),
            ("/in/a.pdf", "ID: 111111111\nY\nID: 333333333\nZ"),
        ]);
        let processor = ComplaintProcessor::new(source);

        let report = processor.process_files(&["/in/b.pdf", "/in/a.pdf"]);
        let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["222222222", "111111111", "333333333"]);
        assert_eq!(report.records[0].source_file, "b.pdf");
    }

    #[test]
    fn test_empty_report() {
        let source = FakeSource::new(&[("/in/empty.pdf", "nothing here")]);
        let processor = ComplaintProcessor::new(source);

        let report = processor.process_files(&["/in/empty.pdf"]);
        assert!(report.is_empty());
        assert!(report.failures.is_empty());
    }
}
