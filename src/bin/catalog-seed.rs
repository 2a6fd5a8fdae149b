//! catalog-seed CLI - generate a SQL seed script from JSON product catalogs
//!
//! Scans a directory of catalog files and writes category, brand and product
//! inserts to a single `.sql` file.

use catalog_seed::codegen::{generate_seed_sql, SeedError};
use catalog_seed::{scan_catalog, Catalog, SeedConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog-seed")]
#[command(version, about = "Generate SQL seed scripts from JSON product catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the catalog and write the SQL seed script
    Generate {
        /// Optional YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory containing catalog .json files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path of the generated .sql file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scan the catalog and print a summary without writing anything
    Inspect {
        /// Optional YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory containing catalog .json files
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, input, output } => generate(config, input, output),
        Commands::Inspect { config, input } => inspect(config, input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Scan, render and write the seed script
fn generate(
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), SeedError> {
    let settings = SeedConfig::load(config.as_deref())
        .and_then(|c| c.resolve(input, output))
        .map_err(SeedError::Config)?;

    let catalog = generate_seed_sql(&settings)?;

    if catalog.skipped_files > 0 {
        tracing::warn!("{} catalog files were skipped", catalog.skipped_files);
    }

    println!("SQL file generated at {}", settings.output_file.display());
    Ok(())
}

/// Print what a generate run would seed
fn inspect(config: Option<PathBuf>, input: Option<PathBuf>) -> Result<(), SeedError> {
    let settings = SeedConfig::load(config.as_deref())
        .and_then(|c| c.resolve(input, None))
        .map_err(SeedError::Config)?;

    let catalog = scan_catalog(&settings.input_dir)?;
    print_summary(&catalog, &settings.colors);
    Ok(())
}

fn print_summary(catalog: &Catalog, colors: &catalog_seed::CategoryColors) {
    println!(
        "Files: {} read, {} skipped",
        catalog.scanned_files, catalog.skipped_files
    );
    println!("Products: {}", catalog.products.len());

    println!("Categories: {}", catalog.categories.len());
    for category in &catalog.categories {
        println!("  {} ({})", category, colors.get(category).unwrap_or("no color"));
    }

    println!("Brands: {}", catalog.brands.len());
    for brand in &catalog.brands {
        println!("  {}", brand);
    }
}
