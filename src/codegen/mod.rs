//! SQL seed script generation.
//!
//! Turns a scanned [`Catalog`](crate::extraction::Catalog) into a PostgreSQL
//! script of category upserts, brand upserts and product inserts.

pub mod colors;
pub mod fs_utils;
pub mod seed_sql;
pub mod utils;

pub use colors::{CategoryColors, DEFAULT_CATEGORY_COLORS};
pub use seed_sql::{brand_upsert, category_upsert, product_insert, render_seed_sql};
pub use utils::{escape_sql_literal, quote_sql_literal};

use crate::extraction::{scan_catalog, Catalog, ScanError};
use crate::project_config::ResolvedSettings;
use std::fmt;
use std::path::{Path, PathBuf};

/// Error type for a whole generation run
#[derive(Debug)]
pub enum SeedError {
    Scan(ScanError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Config(String),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Scan(e) => write!(f, "{}", e),
            SeedError::Io { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            SeedError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Scan(e) => Some(e),
            SeedError::Io { source, .. } => Some(source),
            SeedError::Config(_) => None,
        }
    }
}

impl From<ScanError> for SeedError {
    fn from(err: ScanError) -> Self {
        SeedError::Scan(err)
    }
}

/// Write a rendered script, replacing any existing file
pub fn write_seed_file(path: &Path, sql: &str) -> Result<(), SeedError> {
    fs_utils::write_file(path, sql).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Scan, render and write in one go.
///
/// Returns the catalog that was scanned so callers can report on it.
pub fn generate_seed_sql(settings: &ResolvedSettings) -> Result<Catalog, SeedError> {
    tracing::info!("Scanning catalog files under {}", settings.input_dir.display());
    let catalog = scan_catalog(&settings.input_dir)?;

    let sql = render_seed_sql(&catalog, &settings.colors);
    write_seed_file(&settings.output_file, &sql)?;

    tracing::info!(
        "Wrote {} bytes to {}",
        sql.len(),
        settings.output_file.display()
    );

    Ok(catalog)
}
