use clap::Parser;
use mediascan::config::{Cli, Config};
use mediascan::pipeline::{BatchPaths, run_batch};
use mediascan::text::PdfTextExtractor;
use mediascan::{init_tracing, unpack_error};

fn main() {
    let args = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing();
    tracing::info!(dataset = %args.dataset, "mediascan starting");

    let cfg = Config::resolve(args.config_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!(error = %format!("{:#}", e), "failed to load config file");
        std::process::exit(1);
    });

    let keywords = cfg.keyword_set();
    tracing::info!(keywords = keywords.len(), vocabulary = ?cfg.vocabulary, "keyword set ready");

    let paths = BatchPaths {
        input_dir: cfg.input_dir(&args.dataset),
        filename_table: cfg.filename_table_path(&args.dataset),
        metadata_table: cfg.metadata_table_path(&args.dataset),
    };

    match run_batch(&paths, &PdfTextExtractor::new(), &keywords) {
        Ok(stats) => {
            tracing::info!(documents = stats.documents, failed = stats.failed, "mediascan done");
        }
        Err(e) => {
            tracing::error!(error = %unpack_error(&e), "batch aborted");
            std::process::exit(1);
        }
    }
}
