use anyhow::{Context, Result};
use clap::Parser;
use mediascan::config::Config;
use mediascan::pipeline::scan_document;
use mediascan::text::PdfTextExtractor;
use std::path::Path;

#[derive(Parser)]
#[command(name = "scan_document")]
#[command(about = "Run keyword matching and field extraction on a single PDF")]
struct Cli {
    pdf_path: String,
    #[arg(short = 'c', long = "config")]
    config_path: Option<String>,
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    mediascan::init_tracing();

    let path = Path::new(&cli.pdf_path);

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }

    let cfg = Config::resolve(cli.config_path.as_deref())?;
    let report = scan_document(&PdfTextExtractor::new(), path, &cfg.keyword_set())
        .with_context(|| format!("Failed to scan document: {}", path.display()))?;

    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
