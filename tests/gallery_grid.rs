//! End-to-end grid behavior: manifest in, rendered tiles out, with the
//! empty/missing cases degrading to their messages.

use easel::{ArtManifestEntry, Gallery, Loader, Registry, WallClock};

fn entry(file_name: &str) -> ArtManifestEntry {
    ArtManifestEntry {
        file_name: file_name.to_string(),
        title: easel::manifest::title_case(file_name),
        description: "test entry".to_string(),
    }
}

#[test]
fn full_registry_gallery_renders_every_tile() {
    let entries: Vec<ArtManifestEntry> = Registry::builtin()
        .handles()
        .map(|h| entry(h.file_name()))
        .collect();

    let gallery = Gallery::from_manifest(Loader::new(), &entries, 42).unwrap();
    assert_eq!(gallery.tiles().len(), Registry::builtin().len());
    assert!(gallery.message().is_none());

    for tile in gallery.tiles() {
        assert!(
            !tile.outcome.is_placeholder(),
            "{} unexpectedly placeholdered",
            tile.entry.file_name
        );
        assert!(tile.stage.pixels().iter().any(|&b| b != 0));
    }
}

#[test]
fn zero_entry_manifest_registers_no_canvases() {
    let gallery = Gallery::from_manifest(Loader::new(), &[], 0).unwrap();
    assert!(gallery.tiles().is_empty());
    assert_eq!(gallery.message(), Some(Gallery::EMPTY_MESSAGE));
    assert_eq!(gallery.live_loops(), 0);
}

#[test]
fn one_unknown_entry_degrades_alone() {
    let entries = [
        entry("flow-field"),
        entry("definitely-not-registered"),
        entry("nomos-tangente"),
    ];
    let gallery = Gallery::from_manifest(Loader::new(), &entries, 0).unwrap();

    let placeholders: Vec<&str> = gallery
        .tiles()
        .iter()
        .filter(|t| t.outcome.is_placeholder())
        .map(|t| t.entry.file_name.as_str())
        .collect();
    assert_eq!(placeholders, vec!["definitely-not-registered"]);

    // The placeholder tile is painted, not blank.
    let tile = &gallery.tiles()[1];
    assert!(tile.stage.pixels().iter().any(|&b| b != 0));
}

#[test]
fn load_failed_gallery_has_message_only() {
    let gallery = Gallery::load_failed();
    assert!(gallery.tiles().is_empty());
    assert_eq!(gallery.message(), Some(Gallery::LOAD_FAILED_MESSAGE));
}

#[test]
fn ticking_the_grid_animates_only_live_tiles() {
    let entries = [entry("spiral-motion"), entry("geometric-maze"), entry("particle-waves")];
    let mut gallery = Gallery::from_manifest(Loader::new(), &entries, 9).unwrap();
    assert_eq!(gallery.live_loops(), 2);

    let static_before = gallery.tiles()[1].stage.pixels().to_vec();
    let animated_before = gallery.tiles()[0].stage.pixels().to_vec();

    for _ in 0..5 {
        gallery.tick_all(WallClock::fixed(1, 2, 3, 4)).unwrap();
    }

    assert_eq!(gallery.tiles()[1].stage.pixels(), &static_before[..]);
    assert_ne!(gallery.tiles()[0].stage.pixels(), &animated_before[..]);
}

#[test]
fn drop_cancels_grid_loops() {
    let entries = [entry("spiral-motion"), entry("particle-waves")];
    let gallery = Gallery::from_manifest(Loader::new(), &entries, 0).unwrap();
    let handles: Vec<_> = gallery
        .tiles()
        .iter()
        .filter_map(|t| t.outcome.cancel_handle().cloned())
        .collect();
    assert_eq!(handles.len(), 2);

    drop(gallery);
    assert!(handles.iter().all(|h| h.is_cancelled()));
}
