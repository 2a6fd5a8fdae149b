//! # catalog-seed: product catalog to SQL seed script
//!
//! Walks a directory tree of JSON product-catalog files, collects the
//! distinct category and brand names they reference, and emits a PostgreSQL
//! script that seeds the `categories`, `brands` and `products` tables.
//!
//! ## Input
//!
//! Every `*.json` file below the root is expected to hold an array of
//! objects:
//!
//! ```json
//! [
//!   {"name": "Lipstick", "brand": "Acme", "categoria": "Maquillaje"}
//! ]
//! ```
//!
//! Missing keys fall back to `"Sin Nombre"`, `"Sin Marca"` and
//! `"Sin Categoria"`. Files that fail to parse are logged and skipped.
//!
//! ## Example
//!
//! ```no_run
//! use catalog_seed::{scan_catalog, render_seed_sql, CategoryColors};
//!
//! let catalog = scan_catalog("productos").unwrap();
//! let sql = render_seed_sql(&catalog, &CategoryColors::default());
//! std::fs::write("seed_products.sql", sql).unwrap();
//! ```

// Product records and field extraction
pub mod entity;

// Directory walk and per-file parsing
pub mod extraction;

// SQL script generation
pub mod codegen;

// YAML/env/CLI settings
pub mod project_config;

pub use entity::{ProductRecord, RecordError};
pub use extraction::{scan_catalog, scan_file, Catalog, ScanError};
pub use codegen::{generate_seed_sql, render_seed_sql, write_seed_file, CategoryColors, SeedError};
pub use project_config::{ResolvedSettings, SeedConfig};
