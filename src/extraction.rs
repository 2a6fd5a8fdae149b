//! Catalog scanning: walk a directory tree of JSON catalog files and collect
//! product records plus the distinct brand and category names they use.
//!
//! Individual files are allowed to fail. A file that cannot be read, decoded
//! or parsed is logged and skipped, and the walk carries on with the next one.

use crate::entity::{json_type_name, ProductRecord, RecordError};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffix of catalog documents
pub const CATALOG_EXTENSION: &str = ".json";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Error type for catalog scanning
#[derive(Debug)]
pub enum ScanError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Record {
        path: PathBuf,
        source: RecordError,
    },
    RootNotFound(PathBuf),
    NotADirectory(PathBuf),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ScanError::Encoding { path, source } => {
                write!(f, "{} is not valid UTF-8: {}", path.display(), source)
            }
            ScanError::Json { path, source } => {
                write!(f, "Failed to parse {}: {}", path.display(), source)
            }
            ScanError::Record { path, source } => {
                write!(f, "Invalid record in {}: {}", path.display(), source)
            }
            ScanError::RootNotFound(path) => {
                write!(f, "Directory does not exist: {}", path.display())
            }
            ScanError::NotADirectory(path) => {
                write!(f, "Path is not a directory: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io { source, .. } => Some(source),
            ScanError::Encoding { source, .. } => Some(source),
            ScanError::Json { source, .. } => Some(source),
            ScanError::Record { source, .. } => Some(source),
            ScanError::RootNotFound(_) | ScanError::NotADirectory(_) => None,
        }
    }
}

/// Everything collected from one scan.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Products in scan order, duplicates included
    pub products: Vec<ProductRecord>,
    /// Distinct non-empty brand names
    pub brands: BTreeSet<String>,
    /// Distinct non-empty category names
    pub categories: BTreeSet<String>,
    /// Catalog files that contributed records (possibly zero records each)
    pub scanned_files: usize,
    /// Catalog files skipped because of an error
    pub skipped_files: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, registering its brand and category when non-empty.
    pub fn push(&mut self, record: ProductRecord) {
        if !record.brand.is_empty() {
            self.brands.insert(record.brand.clone());
        }
        if !record.category.is_empty() {
            self.categories.insert(record.category.clone());
        }
        self.products.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Scan every catalog file below `root`.
///
/// Only a missing or non-directory root fails the scan; per-file problems
/// are logged and counted in [`Catalog::skipped_files`].
///
/// Within each directory, files are processed in name order before
/// descending into subdirectories (also in name order).
pub fn scan_catalog<P: AsRef<Path>>(root: P) -> Result<Catalog, ScanError> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut catalog = Catalog::new();
    walk_dir(root, &mut catalog);

    tracing::info!(
        "Scanned {} catalog files under {} ({} skipped): {} products, {} categories, {} brands",
        catalog.scanned_files + catalog.skipped_files,
        root.display(),
        catalog.skipped_files,
        catalog.products.len(),
        catalog.categories.len(),
        catalog.brands.len()
    );

    Ok(catalog)
}

fn walk_dir(dir: &Path, catalog: &mut Catalog) {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            tracing::warn!("Error reading directory {}: {}", dir.display(), e);
            return;
        }
    };

    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Error reading entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", path.display(), e);
                continue;
            }
        };

        if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            // Directory symlinks are not followed
            continue;
        } else if is_catalog_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    subdirs.sort();

    for path in files {
        match scan_file(&path, catalog) {
            Ok(count) => {
                tracing::debug!("Read {} products from {}", count, path.display());
                catalog.scanned_files += 1;
            }
            Err(e) => {
                tracing::warn!("Error processing {}: {}", path.display(), e);
                catalog.skipped_files += 1;
            }
        }
    }

    for subdir in subdirs {
        walk_dir(&subdir, catalog);
    }
}

/// Whether the file name ends in `.json` (case-sensitive)
pub fn is_catalog_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(CATALOG_EXTENSION))
        .unwrap_or(false)
}

/// Parse one catalog file and merge its records into `catalog`.
///
/// Returns the number of records added. A document whose top level is not
/// an array contributes nothing. The file is merged only if every element
/// converts cleanly.
pub fn scan_file(path: &Path, catalog: &mut Catalog) -> Result<usize, ScanError> {
    let bytes = fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_document(&bytes).map_err(|e| e.with_path(path))?;

    let items = match document {
        JsonValue::Array(items) => items,
        other => {
            tracing::debug!(
                "Ignoring {}: top level is {}, not an array",
                path.display(),
                json_type_name(&other)
            );
            return Ok(0);
        }
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| ProductRecord::from_json(index, item))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ScanError::Record {
            path: path.to_path_buf(),
            source,
        })?;

    let count = records.len();
    for record in records {
        catalog.push(record);
    }

    Ok(count)
}

/// Decode UTF-8 (with an optional BOM) and parse as JSON.
fn parse_document(bytes: &[u8]) -> Result<JsonValue, DocumentError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = String::from_utf8(bytes.to_vec()).map_err(DocumentError::Encoding)?;
    serde_json::from_str(&text).map_err(DocumentError::Json)
}

/// Path-less document error, attached to a path by the caller
enum DocumentError {
    Encoding(std::string::FromUtf8Error),
    Json(serde_json::Error),
}

impl DocumentError {
    fn with_path(self, path: &Path) -> ScanError {
        let path = path.to_path_buf();
        match self {
            DocumentError::Encoding(source) => ScanError::Encoding { path, source },
            DocumentError::Json(source) => ScanError::Json { path, source },
        }
    }
}
