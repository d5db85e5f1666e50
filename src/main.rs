//! shop-extract - Structured product data from e-commerce HTML files.
//!
//! Reads already-downloaded HTML from files or stdin; it never fetches pages.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shop_extract::config::{Config, OutputFormat};
use shop_extract::format::Formatter;
use shop_extract::Extractor;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shop-extract",
    version,
    about = "Extract structured product data from e-commerce HTML",
    long_about = "Extracts title, description, brand, price, currency and images from saved product pages."
)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, env = "SHOP_EXTRACT_FORMAT")]
    format: Option<OutputFormat>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract product data from HTML files ("-" reads stdin)
    #[command(alias = "e")]
    Extract {
        /// HTML files to read
        #[arg(default_value = "-")]
        files: Vec<PathBuf>,

        /// Page URL, used only to pick a site profile
        #[arg(short, long, env = "SHOP_EXTRACT_URL")]
        url: Option<String>,
    },

    /// List selector profiles and the domains mapped to them
    Profiles,

    /// List currency symbols that map to more than one code
    Currencies,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }

    let extractor = Extractor::from_config(&config);

    match cli.command {
        Commands::Extract { files, url } => {
            let url = url.or_else(|| config.url.clone());
            let formatter = Formatter::new(config.format);

            let mut records = Vec::with_capacity(files.len());
            for file in &files {
                let html = read_input(file)?;
                info!("Extracting {} ({} bytes)", file.display(), html.len());
                records.push(extractor.extract(&html, url.as_deref()));
            }

            let output = if records.len() == 1 {
                formatter.format_record(&records[0])
            } else {
                formatter.format_records(&records)
            };
            println!("{}", output);
        }

        Commands::Profiles => {
            let profiles = extractor.profiles();
            println!("{:<10} {}", "Profile", "Domains");
            println!("{:-<10} {:-<40}", "", "");
            for name in profiles.names() {
                println!("{:<10} {}", name, profiles.domains_for(name).join(", "));
            }
        }

        Commands::Currencies => {
            let currencies = extractor.currencies();
            println!("{} currency symbols known. Ambiguous symbols (first code wins):\n", currencies.len());
            println!("{:<8} {}", "Symbol", "Codes");
            println!("{:-<8} {:-<20}", "", "");
            for (symbol, codes) in currencies.collisions() {
                println!("{:<8} {}", symbol, codes.join(", "));
            }
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut html = String::new();
        std::io::stdin().read_to_string(&mut html).context("Failed to read HTML from stdin")?;
        return Ok(html);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file: {}", path.display()))
}
