//! # consolidado-cli
//!
//! Command-line interface for extracting campaign rows from spreadsheet
//! exports.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use consolidado_extract::{list_campaigns, CampaignSet, ColumnSelector, DateRange, Preset, RowExtractor};
use consolidado_sheet::{CsvOptions, Grid};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// consolidado - campaign rows from spreadsheet exports, as CSV
#[derive(Parser)]
#[command(name = "consolidado")]
#[command(author, version, about = "Filter spreadsheet exports by campaign and validity dates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the rows of the given campaigns as CSV
    Extract(ExtractArgs),

    /// List the campaigns found below the header row
    Campaigns {
        /// Spreadsheet export (xlsx, xls, xlsb, ods, csv, tsv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short = 'f', long = "format", default_value = "text")]
        format: ListFormat,
    },
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Spreadsheet export (xlsx, xls, xlsb, ods, csv, tsv)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Campaign to include; repeat for several
    #[arg(short = 'c', long = "campaign", value_name = "NAME", required = true)]
    campaigns: Vec<String>,

    /// First day of the range (inclusive)
    #[arg(long = "from", value_name = "DATE")]
    from: String,

    /// Last day of the range (inclusive)
    #[arg(long = "to", value_name = "DATE")]
    to: String,

    /// Named column layout
    #[arg(short = 'p', long = "preset", default_value = "full")]
    preset: PresetArg,

    /// Column ranges as START-END pairs, end exclusive (e.g. 0-9,10-13)
    #[arg(long = "columns", value_name = "RANGES", conflicts_with = "selector_file")]
    columns: Option<String>,

    /// JSON file holding [[start, end], ...] column ranges
    #[arg(long = "selector-file", value_name = "PATH")]
    selector_file: Option<PathBuf>,

    /// Write CSV here instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output field delimiter
    #[arg(short = 'd', long = "delimiter", default_value_t = ',')]
    delimiter: char,
}

/// Column layout presets.
#[derive(Clone, Copy, clap::ValueEnum)]
enum PresetArg {
    /// Wide layout with the repeated detail block
    Full,
    /// Narrow layout
    Compact,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Full => Preset::Full,
            PresetArg::Compact => Preset::Compact,
        }
    }
}

/// Output format for campaign listings.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum ListFormat {
    /// One name per line (default)
    #[default]
    Text,
    /// JSON array
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Extract(args) => run_extract(args).await,
        Command::Campaigns { file, format } => run_campaigns(&file, format).await,
    }
}

/// Read a spreadsheet export into a grid.
async fn load_grid(path: &Path) -> Result<Grid> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let extension = path.extension().and_then(|ext| ext.to_str());
    let grid = Grid::from_bytes(&bytes, extension)
        .with_context(|| format!("Failed to load spreadsheet: {}", path.display()))?;

    info!(
        file = %path.display(),
        sheet = grid.name(),
        rows = grid.row_count(),
        "loaded spreadsheet"
    );
    Ok(grid)
}

/// Resolve the column selector from the preset, inline ranges, or a file.
async fn resolve_selector(args: &ExtractArgs) -> Result<ColumnSelector> {
    if let Some(columns) = &args.columns {
        return columns
            .parse()
            .with_context(|| format!("Invalid --columns value: '{columns}'"));
    }

    if let Some(path) = &args.selector_file {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read selector file: {}", path.display()))?;
        return ColumnSelector::from_json(&json)
            .with_context(|| format!("Invalid selector file: {}", path.display()));
    }

    Ok(ColumnSelector::preset(args.preset.into()))
}

/// Run the extract command.
async fn run_extract(args: ExtractArgs) -> Result<()> {
    if !args.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", args.delimiter);
    }
    let delimiter = args.delimiter as u8;

    let campaigns = CampaignSet::new(&args.campaigns);
    if campaigns.is_empty() {
        bail!("No campaign names given; blank names are ignored");
    }
    let range = DateRange::parse(&args.from, &args.to)?;
    let selector = resolve_selector(&args).await?;
    let grid = load_grid(&args.file).await?;

    info!(%selector, width = selector.width(), "column selector");

    let extractor = RowExtractor::new(campaigns, range, selector);
    let out = extractor.extract(&grid)?;
    let options = CsvOptions::default().with_delimiter(delimiter);

    match &args.output {
        Some(path) => {
            out.save_as_csv(path, options)
                .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
            eprintln!(
                "{} {} rows to {}",
                "Wrote".green().bold(),
                out.row_count() - 1,
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            out.write_csv(&mut stdout, options)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Run the campaigns command.
async fn run_campaigns(file: &Path, format: ListFormat) -> Result<()> {
    let grid = load_grid(file).await?;
    let campaigns = list_campaigns(&grid)?;

    match format {
        ListFormat::Text => {
            for name in &campaigns {
                println!("{name}");
            }
            eprintln!("{} {} campaigns", "Found".cyan().bold(), campaigns.len());
        }
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&campaigns)?);
        }
    }

    Ok(())
}
