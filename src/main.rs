//! # PDF Scout CLI (`pdfscout`)
//!
//! Serves the HTTP API and exposes the same operations as one-shot commands.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pdfscout serve` | Start the HTTP server |
//! | `pdfscout list` | Print the remote catalog |
//! | `pdfscout download <file_id>` | Download one document |
//! | `pdfscout download-all` | Download every catalog entry |
//! | `pdfscout search "<query>"` | Search downloaded documents |
//!
//! ## Examples
//!
//! ```bash
//! pdfscout --config ./config/pdfscout.toml serve
//! pdfscout download 17 --filename handbook.pdf
//! pdfscout search "termination clause"
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pdf_scout::catalog::CatalogFetcher;
use pdf_scout::config::{self, Config};
use pdf_scout::download::Downloader;
use pdf_scout::search::SearchScanner;
use pdf_scout::{logging, remote, server};

/// PDF Scout: fetch PDFs from a remote file-hosting API and search them.
#[derive(Parser)]
#[command(name = "pdfscout", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/pdfscout.toml`. When the file does not exist,
    /// built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/pdfscout.toml")]
    config: PathBuf,

    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server on `[server].bind`.
    Serve,

    /// Print the remote catalog as JSON.
    List,

    /// Download one document by its remote identifier.
    Download {
        /// Remote file identifier.
        file_id: String,

        /// Local filename; defaults to `[storage].default_filename`.
        #[arg(long)]
        filename: Option<String>,
    },

    /// Download every document listed in the remote catalog.
    DownloadAll,

    /// Search downloaded documents for a case-insensitive substring.
    Search {
        /// Text to look for.
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::List => {
            let entries = catalog(&cfg)?.fetch().await?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Download { file_id, filename } => {
            let filename = filename.unwrap_or_else(|| cfg.storage.default_filename.clone());
            let path = downloader(&cfg)?.download(&file_id, &filename).await?;
            println!("{}", path.display());
        }
        Commands::DownloadAll => {
            let outcome = downloader(&cfg)?.download_all(&catalog(&cfg)?).await?;
            for path in &outcome.files {
                println!("{}", path.display());
            }
            println!(
                "downloaded: {}, skipped: {}, failed: {}",
                outcome.files.len(),
                outcome.skipped,
                outcome.failed
            );
            if !outcome.catalog_was_empty() && outcome.files.is_empty() {
                bail!("no files were downloaded");
            }
        }
        Commands::Search { query } => {
            if query.is_empty() {
                bail!("query must not be empty");
            }
            let scanner = SearchScanner::new(&cfg.storage, &cfg.search)?;
            let results = tokio::task::spawn_blocking(move || scanner.scan(&query)).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}

fn catalog(cfg: &Config) -> Result<CatalogFetcher> {
    Ok(CatalogFetcher::new(remote::build_client(&cfg.remote)?, &cfg.remote))
}

fn downloader(cfg: &Config) -> Result<Downloader> {
    Ok(Downloader::new(
        remote::build_client(&cfg.remote)?,
        &cfg.remote,
        &cfg.storage,
    ))
}
