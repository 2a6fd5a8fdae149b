//! Category color table.
//!
//! Categories seeded into the database carry a display color. Known names
//! map to a fixed hex color; anything else is seeded with a NULL color.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

/// Built-in category colors
pub const DEFAULT_CATEGORY_COLORS: [(&str, &str); 6] = [
    ("Accesorio", "#3b82f6"),
    ("Crema", "#ec4899"),
    ("Maquillaje", "#8b5cf6"),
    ("Marroquineria", "#f59e0b"),
    ("Perfume", "#10b981"),
    ("Ráúl", "#6366f1"),
];

fn hex_color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
    })
}

/// Check that `color` looks like `#rgb` or `#rrggbb`
pub fn is_hex_color(color: &str) -> bool {
    hex_color_pattern().is_match(color)
}

/// Mapping from exact category name to hex color.
///
/// Lookups are case- and accent-sensitive: `"maquillaje"` does not match
/// `"Maquillaje"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColors {
    colors: IndexMap<String, String>,
}

impl CategoryColors {
    /// An empty table; every category gets a NULL color
    pub fn empty() -> Self {
        Self {
            colors: IndexMap::new(),
        }
    }

    /// Add or replace a color, rejecting anything that is not a hex color
    pub fn insert(&mut self, category: impl Into<String>, color: impl Into<String>) -> Result<(), String> {
        let category = category.into();
        let color = color.into();

        if !is_hex_color(&color) {
            return Err(format!(
                "Invalid color '{}' for category '{}': expected #rgb or #rrggbb",
                color, category
            ));
        }

        self.colors.insert(category, color);
        Ok(())
    }

    /// Merge overrides into this table, later entries winning
    pub fn extend_from(&mut self, overrides: &IndexMap<String, String>) -> Result<(), String> {
        for (category, color) in overrides {
            self.insert(category.clone(), color.clone())?;
        }
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<&str> {
        self.colors.get(category).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for CategoryColors {
    fn default() -> Self {
        let colors = DEFAULT_CATEGORY_COLORS
            .iter()
            .map(|(name, color)| (name.to_string(), color.to_string()))
            .collect();
        Self { colors }
    }
}
