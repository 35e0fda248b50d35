use crate::record::ComplaintRecord;
use regex::Regex;
use log::debug;

/// Pulls complaint fields out of a single raw block
///
/// ID, timestamp, channel and location come from pattern matches
/// anywhere in the block. Name and description are positional: the
/// name is the line right above the timestamp, the description is
/// everything between the ID line and the name.
pub struct FieldExtractor {
    id_regex: Regex,
    id_line_regex: Regex,
    timestamp_regex: Regex,
    channel_regex: Regex,
    location_regex: Regex,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            id_regex: Regex::new(r"ID:\s*(\d{9})").expect("Invalid id regex"),
            id_line_regex: Regex::new(r"^ID:\s*\d{9}").expect("Invalid id line regex"),
            // e.g. "01/02/23 - 10:00"
            timestamp_regex: Regex::new(r"\d{2}/\d{2}/\d{2}\s*-\s*\d{2}:\d{2}")
                .expect("Invalid timestamp regex"),
            channel_regex: Regex::new(r"Via\s*(?:site|mobile|app)").expect("Invalid channel regex"),
            // "City, ST" on a single line; any whitespace except line breaks
            location_regex: Regex::new(r"[A-Za-z\u{00C0}-\u{017F}'[\s&&[^\n\r]]]+,[\s&&[^\n\r]]*[A-Z]{2}")
                .expect("Invalid location regex"),
        }
    }

    /// Extract a record from `block`, or `None` when it carries no ID
    pub fn extract(&self, block: &str, source_file: &str) -> Option<ComplaintRecord> {
        let id = self.id_regex.captures(block)?.get(1)?.as_str().to_string();

        let timestamp = self.first_match(&self.timestamp_regex, block);
        let channel = self.first_match(&self.channel_regex, block);
        let location = self
            .location_regex
            .find(block)
            .map(|m| m.as_str().trim().to_string());

        let lines: Vec<&str> = block
            .trim()
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let (submitter_name, description) = match &timestamp {
            Some(ts) => self.positional_fields(&lines, ts),
            None => (None, String::new()),
        };

        debug!("Extracted record {} from {}", id, source_file);

        Some(ComplaintRecord {
            id,
            source_file: source_file.to_string(),
            submitter_name,
            timestamp,
            channel,
            location,
            description,
        })
    }

    /// Name and description relative to the line holding `timestamp`
    fn positional_fields(&self, lines: &[&str], timestamp: &str) -> (Option<String>, String) {
        let Some(ts_idx) = lines.iter().position(|line| line.contains(timestamp)) else {
            return (None, String::new());
        };
        if ts_idx == 0 {
            return (None, String::new());
        }

        let name_idx = ts_idx - 1;
        let start_idx = if self.id_line_regex.is_match(lines[0]) { 1 } else { 0 };

        let description = if start_idx < name_idx {
            lines[start_idx..name_idx].join(" ").trim().to_string()
        } else {
            String::new()
        };

        (Some(lines[name_idx].to_string()), description)
    }

    fn first_match(&self, regex: &Regex, text: &str) -> Option<String> {
        regex.find(text).map(|m| m.as_str().to_string())
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
