//! Configuration for seed generation.
//!
//! Settings come from four places, highest priority first:
//! 1. command-line flags
//! 2. environment variables (`CATALOG_SEED_INPUT`, `CATALOG_SEED_OUTPUT`)
//! 3. an optional YAML config file
//! 4. built-in defaults
//!
//! ```yaml
//! input_dir: productos
//! output_file: seed_products.sql
//! replace_default_colors: false
//! category_colors:
//!   Zapatos: "#0ea5e9"
//! ```

use crate::codegen::colors::CategoryColors;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the input directory
pub const INPUT_ENV_VAR: &str = "CATALOG_SEED_INPUT";

/// Environment variable overriding the output file
pub const OUTPUT_ENV_VAR: &str = "CATALOG_SEED_OUTPUT";

/// Contents of a `catalog-seed.yaml` file
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    /// Extra or overriding category colors
    #[serde(default)]
    pub category_colors: IndexMap<String, String>,
    /// Drop the built-in colors and use only `category_colors`
    #[serde(default)]
    pub replace_default_colors: bool,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("productos")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("seed_products.sql")
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_file: default_output_file(),
            category_colors: IndexMap::new(),
            replace_default_colors: false,
        }
    }
}

/// Paths and colors after all sources have been merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub colors: CategoryColors,
}

impl SeedConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        Self::from_yaml(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        let config: Self = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check color values without building the table
    pub fn validate(&self) -> Result<(), String> {
        self.colors().map(|_| ())
    }

    /// Category color table with this config's overrides applied
    pub fn colors(&self) -> Result<CategoryColors, String> {
        let mut colors = if self.replace_default_colors {
            CategoryColors::empty()
        } else {
            CategoryColors::default()
        };
        colors.extend_from(&self.category_colors)?;
        Ok(colors)
    }

    /// Merge CLI flags and process environment over this config
    pub fn resolve(
        &self,
        input_flag: Option<PathBuf>,
        output_flag: Option<PathBuf>,
    ) -> Result<ResolvedSettings, String> {
        self.resolve_with_env(input_flag, output_flag, |key| std::env::var(key).ok())
    }

    /// Same as [`SeedConfig::resolve`] with a caller-supplied environment lookup
    pub fn resolve_with_env<F>(
        &self,
        input_flag: Option<PathBuf>,
        output_flag: Option<PathBuf>,
        env: F,
    ) -> Result<ResolvedSettings, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = |key: &str| env(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        let input_dir = input_flag
            .or_else(|| from_env(INPUT_ENV_VAR))
            .unwrap_or_else(|| self.input_dir.clone());
        let output_file = output_flag
            .or_else(|| from_env(OUTPUT_ENV_VAR))
            .unwrap_or_else(|| self.output_file.clone());

        Ok(ResolvedSettings {
            input_dir,
            output_file,
            colors: self.colors()?,
        })
    }
}
