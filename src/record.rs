use serde::Serialize;

/// Column headers, in display and export order
pub const COLUMNS: [&str; 7] = ["ID", "Arquivo", "Nome", "DataHora", "Via", "Local", "Descricao"];

/// One complaint pulled out of a PDF export
///
/// Only `id` is guaranteed; every other field is whatever its pattern
/// matched in the source block, or `None`. Serialized keys follow `COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplaintRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Arquivo")]
    pub source_file: String,
    #[serde(rename = "Nome")]
    pub submitter_name: Option<String>,
    #[serde(rename = "DataHora")]
    pub timestamp: Option<String>,
    #[serde(rename = "Via")]
    pub channel: Option<String>,
    #[serde(rename = "Local")]
    pub location: Option<String>,
    #[serde(rename = "Descricao")]
    pub description: String,
}

impl ComplaintRecord {
    /// Cell values in `COLUMNS` order
    pub fn cells(&self) -> [Option<&str>; 7] {
        [
            Some(self.id.as_str()),
            Some(self.source_file.as_str()),
            self.submitter_name.as_deref(),
            self.timestamp.as_deref(),
            self.channel.as_deref(),
            self.location.as_deref(),
            Some(self.description.as_str()),
        ]
    }
}

/// Per-file failure surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

/// Everything a run produced, in file processing order
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub pdf_count: usize,
    pub records: Vec<ComplaintRecord>,
    pub failures: Vec<FileFailure>,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComplaintRecord {
        ComplaintRecord {
            id: "123456789".to_string(),
            source_file: "a.pdf".to_string(),
            submitter_name: None,
            timestamp: Some("01/02/23 - 10:00".to_string()),
            channel: None,
            location: None,
            description: String::new(),
        }
    }

    #[test]
    fn test_json_keys_follow_columns() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();
        for column in COLUMNS {
            assert!(object.contains_key(column), "missing {}", column);
        }
        assert!(object["Nome"].is_null());
        assert_eq!(object["DataHora"], "01/02/23 - 10:00");
    }

    #[test]
    fn test_cells_order() {
        let record = sample();
        let cells = record.cells();
        assert_eq!(cells[0], Some("123456789"));
        assert_eq!(cells[1], Some("a.pdf"));
        assert_eq!(cells[2], None);
        assert_eq!(cells[6], Some(""));
    }
}
