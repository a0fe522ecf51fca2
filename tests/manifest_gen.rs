//! Build-time manifest generation: directory scan, metadata extraction,
//! title-case fallback, and agreement with the compiled registry.

use easel::Registry;
use easel::manifest::{generate_art_manifest, load_art_manifest, write_json};

#[test]
fn extracts_metadata_literals_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();

    std::fs::write(
        dir.path().join("flow_field.rs"),
        r#"
            fn metadata(&self) -> Metadata {
                Metadata::new(
                    "Flow Field",
                    "Organic flowing lines following mathematical vector fields",
                )
            }
        "#,
    )
    .unwrap();
    // No metadata literal: falls back to title-cased stem.
    std::fs::write(dir.path().join("mystery_piece.rs"), "pub struct MysteryPiece;").unwrap();
    // Non-module files are ignored.
    std::fs::write(dir.path().join("mod.rs"), "pub mod flow_field;").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a module").unwrap();

    let entries = generate_art_manifest(dir.path()).unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].file_name, "flow-field");
    assert_eq!(entries[0].title, "Flow Field");
    assert_eq!(
        entries[0].description,
        "Organic flowing lines following mathematical vector fields"
    );

    assert_eq!(entries[1].file_name, "mystery-piece");
    assert_eq!(entries[1].title, "Mystery Piece");
    assert_eq!(entries[1].description, "A generative art piece.");
}

#[test]
fn generated_manifest_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("spiral_motion.rs"),
        r#"Metadata::new("Spiral Motion", "Animated spiral with rotating particles")"#,
    )
    .unwrap();

    let entries = generate_art_manifest(dir.path()).unwrap();
    let manifest_path = dir.path().join("manifest.json");
    write_json(&manifest_path, &entries).unwrap();

    let loaded = load_art_manifest(&manifest_path).unwrap();
    assert_eq!(loaded, entries);

    let raw = std::fs::read_to_string(&manifest_path).unwrap();
    assert!(raw.contains("\"fileName\": \"spiral-motion\""));
}

#[test]
fn scanning_the_crate_sources_matches_the_registry_exactly() {
    // The real module directory is the generator's production input: the
    // scan and the compiled registry must agree piece-for-piece, and every
    // extracted title must match the module's own metadata.
    let entries = generate_art_manifest(std::path::Path::new("src/art")).unwrap();
    let registry = Registry::builtin();

    let generated: std::collections::BTreeSet<&str> =
        entries.iter().map(|e| e.file_name.as_str()).collect();
    let registered: std::collections::BTreeSet<&str> =
        registry.handles().map(|h| h.file_name()).collect();
    assert_eq!(generated, registered);

    for entry in &entries {
        let handle = registry.resolve(&entry.file_name).unwrap();
        let meta = handle.metadata();
        assert_eq!(entry.title, meta.title, "{} title drifted", entry.file_name);
        assert_eq!(
            entry.description, meta.description,
            "{} description drifted",
            entry.file_name
        );
    }
}

#[test]
fn empty_directory_generates_empty_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let entries = generate_art_manifest(dir.path()).unwrap();
    assert!(entries.is_empty());
}
