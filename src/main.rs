use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use complaint_extractor::{
    ComplaintProcessor, PdfTextExtractor, build_spreadsheet, render_json, render_table, unpack_pdfs,
};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    #[value(name = "none")]
    Quiet,
}

/// Extracts complaint records from a ZIP of Reclame Aqui PDF exports
#[derive(Parser, Debug)]
#[command(name = "complaint-extractor")]
#[command(about = "Extracts complaint records from a ZIP of PDF exports and saves them as a spreadsheet")]
struct Cli {
    /// ZIP archive containing the exported PDFs
    archive: PathBuf,

    /// Directory where extracao_reclame_aqui.xlsx is written
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// Skip writing the spreadsheet
    #[arg(long = "no-export")]
    no_export: bool,

    /// How records are printed to stdout
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Maximum column width in table output
    #[arg(long = "max-width", default_value_t = 40)]
    max_width: usize,

    /// Directory holding the pdfium shared library
    #[arg(long = "pdfium-lib", env = "COMPLAINT_PDFIUM_PATH")]
    pdfium_lib: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Erro: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let unpacked = unpack_pdfs(&cli.archive)
        .with_context(|| format!("Failed to unpack {}", cli.archive.display()))?;
    println!("Total de PDFs encontrados: {}", unpacked.pdf_files().len());

    let processor = ComplaintProcessor::new(PdfTextExtractor::new(cli.pdfium_lib.as_deref()));
    let report = processor.process_files(unpacked.pdf_files());

    for failure in &report.failures {
        eprintln!("Erro ao processar o arquivo {}: {}", failure.file_name, failure.message);
    }

    if report.is_empty() {
        eprintln!("Nenhuma informação extraída dos PDFs.");
        return Ok(());
    }

    match cli.format {
        OutputFormat::Table => print!("{}", render_table(&report.records, cli.max_width)),
        OutputFormat::Json => println!("{}", render_json(&report.records).context("Failed to render JSON")?),
        OutputFormat::Quiet => {}
    }

    if !cli.no_export {
        let artifact = build_spreadsheet(&report.records).context("Failed to build spreadsheet")?;
        let path = artifact
            .write_to(&cli.output_dir)
            .with_context(|| format!("Failed to write spreadsheet to {}", cli.output_dir.display()))?;
        println!("{} registros salvos em {}", report.records.len(), path.display());
    }

    Ok(())
}
