use crate::error::ProcessingError;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;
use log::{debug, info, warn};

/// PDFs unpacked from one archive
///
/// The files live in a private temporary directory that is removed when
/// this value is dropped.
pub struct UnpackedArchive {
    dir: TempDir,
    pdf_files: Vec<PathBuf>,
}

impl UnpackedArchive {
    /// Unpacked PDF paths, in archive entry order
    pub fn pdf_files(&self) -> &[PathBuf] {
        &self.pdf_files
    }

    /// Temporary directory the PDFs were unpacked into
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Case-insensitive `.pdf` extension check
pub fn is_pdf(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Unpack every PDF in the `.zip` at `zip_path` into a fresh temporary directory
pub fn unpack_pdfs(zip_path: &Path) -> Result<UnpackedArchive, ProcessingError> {
    let is_zip = zip_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if !is_zip {
        return Err(ProcessingError::InvalidInput(format!(
            "{} is not a .zip archive",
            zip_path.display()
        )));
    }

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;
    let dir = tempfile::Builder::new().prefix("pdfs_extraidos").tempdir()?;

    info!("Unpacking {} ({} entries) into {}", zip_path.display(), archive.len(), dir.path().display());

    let mut pdf_files = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if !entry.is_file() || !is_pdf(entry.name()) {
            debug!("Skipping archive entry {}", entry.name());
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };

        let target = dir.path().join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        // Repeated entry paths overwrite the same file; list it once
        if !pdf_files.contains(&target) {
            pdf_files.push(target);
        }
    }

    info!("Found {} PDFs in {}", pdf_files.len(), zip_path.display());
    Ok(UnpackedArchive { dir, pdf_files })
}
