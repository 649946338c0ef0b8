use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use pricelist_summary::parser::DEFAULT_MAX_PAGES;
use pricelist_summary::pipeline::{
    self, ContentMode, Discovery, OutputFormat, PipelineConfig, PipelineOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "pricelist-summary")]
#[command(version, about = "Summarize a folder of vehicle price-list PDFs as HTML and JSON", long_about = None)]
struct Cli {
    /// Folder with the price-list PDFs
    #[arg(short, long, default_value = "cenniky")]
    input: PathBuf,

    /// Folder the summary is written to
    #[arg(short, long, default_value = "docs")]
    output: PathBuf,

    /// Filenames in the report are relative to this folder [default: parent of input]
    #[arg(long)]
    root: Option<PathBuf>,

    /// Prefix put in front of each filename in links
    #[arg(long, default_value = "../")]
    link_prefix: String,

    /// Output format(s) to generate
    #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = vec![Format::Html, Format::Json, Format::Shell])]
    format: Vec<Format>,

    /// Number of leading pages scanned for prices
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Only use filenames, never open the PDFs
    #[arg(long)]
    no_content: bool,

    /// Disable progress output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum Format {
    Html,
    Json,
    Shell,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Json => OutputFormat::Json,
            Format::Shell => OutputFormat::Shell,
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = PipelineConfig {
        input_dir: cli.input,
        output_dir: cli.output,
        root: cli.root,
        link_prefix: cli.link_prefix,
        formats: cli.format.into_iter().map(OutputFormat::from).collect(),
        content: if cli.no_content {
            ContentMode::Disabled
        } else {
            ContentMode::Pdf {
                max_pages: cli.max_pages,
            }
        },
    };
    let quiet = cli.quiet;

    if !quiet {
        println!("[*] Input: {}", config.input_dir.display());
        println!("[*] Output: {}", config.output_dir.display());
        if config.content == ContentMode::Disabled {
            println!("[*] Content extraction disabled, using filenames only");
        }
    }

    let discovery = pipeline::discover(&config)
        .with_context(|| format!("Failed to scan: {}", config.input_dir.display()))?;
    let outcome = match discovery {
        Discovery::MissingInput(dir) => PipelineOutcome::MissingInput(dir),
        Discovery::NoInput(dir) => PipelineOutcome::NoInput(dir),
        Discovery::Ready(discovered) => {
            if !quiet {
                println!("[*] Found {} PDF files", discovered.file_count());
            }
            pipeline::process(&discovered, &config)
                .with_context(|| format!("Failed to summarize: {}", config.input_dir.display()))?
        }
    };

    match outcome {
        PipelineOutcome::MissingInput(dir) => {
            println!("[!] Input folder not found: {}", dir.display());
        }
        PipelineOutcome::NoInput(dir) => {
            println!("[!] No PDF files found in {}", dir.display());
        }
        PipelineOutcome::Written { stats, files } => {
            if !quiet {
                for file in &files {
                    println!("[+] Wrote {}", file.display());
                }
            }
            println!("\nSummary:");
            println!("  Total manufacturers: {}", stats.total_manufacturers);
            println!("  Total models: {}", stats.total_models);
            println!("  Total price lists: {}", stats.total_price_lists);
            if !quiet {
                println!("\n[✓] Done! Results saved to: {}", config.output_dir.display());
            }
        }
    }

    Ok(())
}
