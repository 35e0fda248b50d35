use crate::error::ProcessingError;
use crate::record::{COLUMNS, ComplaintRecord};
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info};

/// File name of the spreadsheet download
pub const EXPORT_FILE_NAME: &str = "extracao_reclame_aqui.xlsx";

/// MIME type of the spreadsheet download
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Reclamacoes";

/// An in-memory file ready to be handed to the user
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its fixed file name
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ProcessingError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name);
        fs::write(&path, &self.bytes)?;
        info!("Wrote {} ({}, {} bytes)", path.display(), self.mime_type, self.bytes.len());
        Ok(path)
    }
}

/// Build the xlsx workbook: header row, then one row per record
pub fn build_spreadsheet(records: &[ComplaintRecord]) -> Result<ExportArtifact, ProcessingError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, cell) in record.cells().iter().enumerate() {
            // Absent fields stay as blank cells
            if let Some(value) = cell {
                worksheet.write_string(row, col as u16, *value)?;
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    debug!("Built spreadsheet with {} rows ({} bytes)", records.len(), bytes.len());

    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME,
        mime_type: XLSX_MIME_TYPE,
        bytes,
    })
}

/// Records as a pretty-printed JSON array keyed by column name
pub fn render_json(records: &[ComplaintRecord]) -> Result<String, ProcessingError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Plain-text grid of the records, each column capped at `max_width` characters
pub fn render_table(records: &[ComplaintRecord], max_width: usize) -> String {
    let max_width = max_width.max(8);

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            record
                .cells()
                .iter()
                .map(|cell| fit_cell(cell.unwrap_or(""), max_width))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|name| name.chars().count()).collect();
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");

    let mut output = String::new();
    let header: Vec<String> = COLUMNS.iter().map(|name| name.to_string()).collect();
    output.push_str(&format_row(&header, &widths));
    output.push_str(&format!("+{}+\n", separator));
    for row in &rows {
        output.push_str(&format_row(row, &widths));
    }
    output
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!(" {}{} ", cell, " ".repeat(pad))
        })
        .collect();
    format!("|{}|\n", padded.join("|"))
}

/// Flatten line breaks and truncate with an ellipsis past `max_width`
fn fit_cell(value: &str, max_width: usize) -> String {
    let flat: String = value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if flat.chars().count() <= max_width {
        return flat;
    }
    let mut truncated: String = flat.chars().take(max_width - 1).collect();
    truncated.push('…');
    truncated
}
