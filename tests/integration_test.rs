//! Integration tests for catalog scanning and seed script generation

use catalog_seed::codegen::generate_seed_sql;
use catalog_seed::{render_seed_sql, scan_catalog, CategoryColors, SeedConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_catalog(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_single_product_end_to_end() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_catalog(
        input.path(),
        "a.json",
        r#"[{"name":"Lipstick","brand":"Acme","categoria":"Maquillaje"}]"#,
    );

    let settings = SeedConfig::default()
        .resolve_with_env(
            Some(input.path().to_path_buf()),
            Some(output.path().join("seed_products.sql")),
            no_env,
        )
        .unwrap();

    let catalog = generate_seed_sql(&settings).unwrap();
    assert_eq!(catalog.products.len(), 1);

    let sql = fs::read_to_string(output.path().join("seed_products.sql")).unwrap();

    assert_eq!(sql.matches("INSERT INTO categories").count(), 1);
    assert!(sql.contains("VALUES (gen_random_uuid(), 'Maquillaje', '#8b5cf6', true, now(), now())"));

    assert_eq!(sql.matches("INSERT INTO brands").count(), 1);
    assert!(sql.contains("VALUES (gen_random_uuid(), 'Acme', now(), now()) ON CONFLICT (name) DO NOTHING;"));

    assert_eq!(sql.matches("INSERT INTO products").count(), 1);
    assert!(sql.contains("'Lipstick',\n    0,"));
    assert!(sql.contains("(SELECT id FROM categories WHERE name = 'Maquillaje' LIMIT 1)"));
    assert!(sql.contains("(SELECT id FROM brands WHERE name = 'Acme' LIMIT 1)"));
}

#[test]
fn test_every_object_yields_one_record() {
    let input = TempDir::new().unwrap();
    write_catalog(
        input.path(),
        "mixed.json",
        r#"[
            {"name": "Rouge"},
            {"brand": "Acme"},
            {"category": "Crema"},
            {}
        ]"#,
    );

    let catalog = scan_catalog(input.path()).unwrap();
    assert_eq!(catalog.products.len(), 4);

    assert_eq!(catalog.products[0].brand, "Sin Marca");
    assert_eq!(catalog.products[1].name, "Sin Nombre");
    assert_eq!(catalog.products[2].category, "Crema");
    assert_eq!(catalog.products[3].category, "Sin Categoria");

    let brands: Vec<_> = catalog.brands.iter().cloned().collect();
    assert_eq!(brands, vec!["Acme", "Sin Marca"]);
}

#[test]
fn test_malformed_files_do_not_abort_the_run() {
    let input = TempDir::new().unwrap();
    write_catalog(input.path(), "broken.json", "[{\"name\": \"Rouge\",");
    write_catalog(input.path(), "object.json", r#"{"name": "Not a list"}"#);
    write_catalog(input.path(), "sub/good.json", r#"[{"name": "Gloss", "brand": "Acme"}]"#);
    write_catalog(input.path(), "sub/notes.txt", "[{\"name\": \"ignored\"}]");

    let catalog = scan_catalog(input.path()).unwrap();

    assert_eq!(catalog.products.len(), 1);
    assert_eq!(catalog.products[0].name, "Gloss");
    assert_eq!(catalog.skipped_files, 1);
    assert_eq!(catalog.scanned_files, 2);
}

#[test]
fn test_sets_are_deduplicated_and_sorted() {
    let input = TempDir::new().unwrap();
    write_catalog(
        input.path(),
        "one.json",
        r#"[
            {"name": "A", "brand": "Zen", "categoria": "Perfume"},
            {"name": "B", "brand": "Acme", "categoria": "Crema"}
        ]"#,
    );
    write_catalog(
        input.path(),
        "two.json",
        r#"[
            {"name": "A", "brand": " Zen ", "categoria": "Perfume"},
            {"name": "C", "brand": "Beta", "categoria": "Accesorio"}
        ]"#,
    );

    let catalog = scan_catalog(input.path()).unwrap();
    let sql = render_seed_sql(&catalog, &CategoryColors::default());

    assert_eq!(sql.matches("INSERT INTO categories").count(), 3);
    assert_eq!(sql.matches("INSERT INTO brands").count(), 3);
    assert_eq!(sql.matches("INSERT INTO products").count(), 4);

    let positions: Vec<usize> = ["'Accesorio'", "'Crema'", "'Perfume'"]
        .iter()
        .map(|name| sql.find(&format!("VALUES (gen_random_uuid(), {}, '#", name)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let brand_positions: Vec<usize> = ["'Acme'", "'Beta'", "'Zen'"]
        .iter()
        .map(|name| sql.find(&format!("VALUES (gen_random_uuid(), {}, now()", name)).unwrap())
        .collect();
    assert!(brand_positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_case_and_spacing_variants_stay_distinct() {
    let input = TempDir::new().unwrap();
    write_catalog(
        input.path(),
        "a.json",
        r#"[{"categoria": "crema"}, {"categoria": "Crema"}]"#,
    );

    let catalog = scan_catalog(input.path()).unwrap();
    let sql = render_seed_sql(&catalog, &CategoryColors::default());

    assert_eq!(catalog.categories.len(), 2);
    assert!(sql.contains("'Crema', '#ec4899'"));
    assert!(sql.contains("'crema', NULL"));
}

#[test]
fn test_quotes_are_doubled() {
    let input = TempDir::new().unwrap();
    write_catalog(
        input.path(),
        "a.json",
        r#"[{"name": "O'Brien", "brand": "L'Oréal", "categoria": "Men's"}]"#,
    );

    let catalog = scan_catalog(input.path()).unwrap();
    let sql = render_seed_sql(&catalog, &CategoryColors::default());

    assert!(sql.contains("'O''Brien'"));
    assert!(sql.contains("(SELECT id FROM brands WHERE name = 'L''Oréal' LIMIT 1)"));
    assert!(sql.contains("'Men''s', NULL"));
    assert!(!sql.contains("O'Brien"));
}

#[test]
fn test_bom_prefixed_file() {
    let input = TempDir::new().unwrap();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(r#"[{"name": "Ráúl Set", "categoria": "Ráúl"}]"#.as_bytes());
    fs::write(input.path().join("bom.json"), bytes).unwrap();

    let catalog = scan_catalog(input.path()).unwrap();
    let sql = render_seed_sql(&catalog, &CategoryColors::default());

    assert_eq!(catalog.skipped_files, 0);
    assert!(sql.contains("'Ráúl', '#6366f1'"));
}

#[test]
fn test_output_is_overwritten_and_parents_created() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let output_file: PathBuf = output.path().join("nested/dir/seed.sql");
    write_catalog(input.path(), "a.json", r#"[{"name": "Rouge"}]"#);

    fs::create_dir_all(output_file.parent().unwrap()).unwrap();
    fs::write(&output_file, "stale contents ".repeat(1000)).unwrap();

    let settings = SeedConfig::default()
        .resolve_with_env(Some(input.path().to_path_buf()), Some(output_file.clone()), no_env)
        .unwrap();
    generate_seed_sql(&settings).unwrap();

    let sql = fs::read_to_string(&output_file).unwrap();
    assert!(sql.starts_with("SET client_encoding TO 'UTF8';"));
    assert!(!sql.contains("stale"));
}

#[test]
fn test_missing_input_directory_is_an_error() {
    let output = TempDir::new().unwrap();
    let settings = SeedConfig::default()
        .resolve_with_env(
            Some(output.path().join("does-not-exist")),
            Some(output.path().join("seed.sql")),
            no_env,
        )
        .unwrap();

    let err = generate_seed_sql(&settings).unwrap_err();
    assert!(err.to_string().contains("Directory does not exist"));
    assert!(!output.path().join("seed.sql").exists());
}

#[test]
fn test_config_file_colors_flow_into_output() {
    let work = TempDir::new().unwrap();
    let input = work.path().join("productos");
    write_catalog(&input, "a.json", r#"[{"categoria": "Zapatos"}]"#);

    let config_path = work.path().join("catalog-seed.yaml");
    fs::write(
        &config_path,
        format!(
            "input_dir: {}\noutput_file: {}\ncategory_colors:\n  Zapatos: \"#0ea5e9\"\n",
            input.display(),
            work.path().join("out.sql").display()
        ),
    )
    .unwrap();

    let settings = SeedConfig::from_file(&config_path)
        .unwrap()
        .resolve_with_env(None, None, no_env)
        .unwrap();
    generate_seed_sql(&settings).unwrap();

    let sql = fs::read_to_string(work.path().join("out.sql")).unwrap();
    assert!(sql.contains("'Zapatos', '#0ea5e9'"));
}
