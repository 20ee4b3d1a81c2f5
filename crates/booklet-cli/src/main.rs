use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "booklet", about = "Impose a PDF for saddle-stitched booklet printing", version)]
struct Cli {
    /// Input PDF file
    input: PathBuf,

    /// Title the output file is named after (defaults to the input file name)
    #[arg(short, long)]
    title: Option<String>,

    /// Directory the booklet is written into
    #[arg(short, long, default_value = ".")]
    destination: PathBuf,

    /// Suffix appended to the title
    #[arg(long, default_value = " booklet.pdf")]
    suffix: String,

    /// Output sheet size
    #[arg(long, default_value = "a3", value_enum)]
    sheet: SheetArg,

    /// Custom sheet width in points (with --sheet-height-pt, overrides --sheet)
    #[arg(long, requires = "sheet_height_pt")]
    sheet_width_pt: Option<f32>,

    /// Custom sheet height in points
    #[arg(long, requires = "sheet_width_pt")]
    sheet_height_pt: Option<f32>,

    /// Creep compensation per sheet in points
    #[arg(long, default_value = "0.5")]
    creep: f32,

    /// Sheets per signature (reserved, currently ignored)
    #[arg(long, default_value = "0")]
    signature: usize,

    /// Stroke a frame around each placed page
    #[arg(long)]
    outline: bool,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SheetArg {
    A4,
    A3,
    Letter,
    Tabloid,
}

impl From<SheetArg> for booklet_impose::SheetSize {
    fn from(arg: SheetArg) -> Self {
        match arg {
            SheetArg::A4 => Self::A4,
            SheetArg::A3 => Self::A3,
            SheetArg::Letter => Self::Letter,
            SheetArg::Tabloid => Self::Tabloid,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let sheet_size = match (cli.sheet_width_pt, cli.sheet_height_pt) {
        (Some(width_pt), Some(height_pt)) => {
            booklet_impose::SheetSize::Custom { width_pt, height_pt }
        }
        _ => cli.sheet.into(),
    };

    let options = booklet_impose::BookletOptions {
        destination: cli.destination,
        suffix: cli.suffix,
        sheet_size,
        creep_pt: cli.creep,
        signature: cli.signature,
        outline: cli.outline,
        ..Default::default()
    };

    // Load the source PDF
    let source = booklet_impose::load_document(&cli.input).await?;

    // Calculate and show statistics
    let stats = booklet_impose::calculate_statistics(&source);
    println!("Booklet statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Sheets: {}", stats.sheets);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Blank slots added: {}", stats.blank_slots);

    // Creep never resets, so a long run can walk the leaves together.
    let drift_pt = stats.sheets as f32 * cli.creep.abs();
    if drift_pt > options.sheet_size.leaf_width_pt() / 2.0 {
        log::debug!(
            "total creep drift of {}pt crowds the leaves on a {}pt leaf",
            drift_pt,
            options.sheet_size.leaf_width_pt()
        );
    }

    if cli.stats_only {
        return Ok(());
    }

    let title = match cli.title {
        Some(title) => title,
        None => cli
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context("Input path has no file name")?,
    };

    // Perform imposition
    log::info!(
        "imposing {} pages onto {} sheets",
        stats.source_pages,
        stats.sheets
    );
    let booklet = booklet_impose::make_booklet(&source, &options).await?;

    let output_path = options.output_path(&title);
    booklet_impose::save_document(booklet, &output_path).await?;
    println!("Booklet → {}", output_path.display());

    Ok(())
}
