//! Seed script generation for the categories, brands and products tables.
//!
//! The script is meant to be replayed against a live database:
//! - categories are upserted, refreshing their color on conflict
//! - brands are inserted once and never touched again
//! - products are always inserted, resolving their category and brand ids
//!   by name with correlated subqueries at execution time

use super::colors::CategoryColors;
use super::utils::{quote_sql_literal, sql_literal_or_null};
use crate::entity::ProductRecord;
use crate::extraction::Catalog;

/// Session and extension setup emitted before any insert
pub const SCRIPT_HEADER: [&str; 2] = [
    "SET client_encoding TO 'UTF8';",
    "CREATE EXTENSION IF NOT EXISTS \"pgcrypto\";\n",
];

const CATEGORY_COLUMNS: &str = "(id, name, color, \"isActive\", \"createdAt\", \"updatedAt\")";
const BRAND_COLUMNS: &str = "(id, name, \"createdAt\", \"updatedAt\")";
const PRODUCT_COLUMNS: &str = "(id, name, cost, \"categoryId\", \"brandId\", \"isActive\", \"useCustomMargin\", \"stock\", \"createdAt\", \"updatedAt\")";

/// Render the complete seed script.
///
/// Categories and brands come out in lexicographic order, products in scan
/// order. Statements are newline-separated with no trailing newline.
pub fn render_seed_sql(catalog: &Catalog, colors: &CategoryColors) -> String {
    let mut lines: Vec<String> = SCRIPT_HEADER.iter().map(|s| s.to_string()).collect();

    lines.push("-- Categorias".to_string());
    for category in &catalog.categories {
        lines.push(category_upsert(category, colors.get(category)));
    }

    lines.push("\n-- Marcas".to_string());
    for brand in &catalog.brands {
        lines.push(brand_upsert(brand));
    }

    lines.push("\n-- Productos".to_string());
    for product in &catalog.products {
        lines.push(product_insert(product));
    }

    lines.join("\n")
}

/// Upsert a category; an existing row only has its color refreshed
pub fn category_upsert(name: &str, color: Option<&str>) -> String {
    format!(
        "INSERT INTO categories {} VALUES (gen_random_uuid(), {}, {}, true, now(), now()) ON CONFLICT (name) DO UPDATE SET color = EXCLUDED.color;",
        CATEGORY_COLUMNS,
        quote_sql_literal(name),
        sql_literal_or_null(color)
    )
}

/// Insert a brand unless one with the same name exists
pub fn brand_upsert(name: &str) -> String {
    format!(
        "INSERT INTO brands {} VALUES (gen_random_uuid(), {}, now(), now()) ON CONFLICT (name) DO NOTHING;",
        BRAND_COLUMNS,
        quote_sql_literal(name)
    )
}

/// Insert a product, looking up its foreign keys by name.
///
/// With duplicate names in the lookup tables the subquery picks an arbitrary
/// match (`LIMIT 1`); with no match the foreign key is NULL.
pub fn product_insert(product: &ProductRecord) -> String {
    let values = [
        "gen_random_uuid()".to_string(),
        quote_sql_literal(&product.name),
        product.cost.to_string(),
        format!(
            "(SELECT id FROM categories WHERE name = {} LIMIT 1)",
            quote_sql_literal(&product.category)
        ),
        format!(
            "(SELECT id FROM brands WHERE name = {} LIMIT 1)",
            quote_sql_literal(&product.brand)
        ),
        "true".to_string(),
        "false".to_string(),
        "0".to_string(),
        "now()".to_string(),
        "now()".to_string(),
    ];

    format!(
        "INSERT INTO products {}\nVALUES (\n    {}\n);",
        PRODUCT_COLUMNS,
        values.join(",\n    ")
    )
}
