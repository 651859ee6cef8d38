//! ceneo-opinions - Ceneo.pl product review scraper CLI
//!
//! Extracts opinions with TLS fingerprint emulation and keeps them as JSON.

use anyhow::Result;
use ceneo_opinions::commands::{DownloadCommand, ExtractCommand, ProductsCommand, ShowCommand};
use ceneo_opinions::config::{Config, OutputFormat};
use ceneo_opinions::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ceneo-opinions",
    version,
    about = "Ceneo.pl product review scraper",
    long_about = "Extracts every opinion of a Ceneo.pl product, computes statistics, and exports them as JSON, CSV, or XLSX."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding extracted products
    #[arg(short, long, global = true, env = "CENEO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "CENEO_PROXY")]
    proxy: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape all opinions of a product and save them
    #[command(alias = "e")]
    Extract {
        /// Ceneo product id (the number in the product URL)
        product_id: String,
    },

    /// List extracted products
    #[command(alias = "ls")]
    Products,

    /// Show stats and charts of an extracted product
    Show {
        /// Ceneo product id
        product_id: String,

        /// List every opinion too
        #[arg(long)]
        opinions: bool,
    },

    /// Export an extracted product's opinions to a file
    Download {
        /// Ceneo product id
        product_id: String,

        /// File format: json, csv, xlsx
        #[arg(long = "as", value_name = "FORMAT")]
        export_as: ExportFormat,

        /// Output path (defaults to <product_id>.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Extract { product_id } => {
            let cmd = ExtractCommand::new(config);
            let output = cmd.execute(&product_id).await?;
            println!("{}", output);
        }

        Commands::Products => {
            let output = ProductsCommand::new(config).execute()?;
            println!("{}", output);
        }

        Commands::Show { product_id, opinions } => {
            let output = ShowCommand::new(config).execute(&product_id, opinions)?;
            println!("{}", output);
        }

        Commands::Download { product_id, export_as, output } => {
            let path =
                DownloadCommand::new(config).execute(&product_id, export_as, output.as_deref())?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}
