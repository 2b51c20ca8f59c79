use pretty_assertions::assert_eq;
use skindex::{Catalog, FeedFormat, FeedSource, LoadError, RelatedCollections, SharedKnifeCases};
use std::io::Write;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/skins.json")
}

fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    use flate2::{Compression, GzBuilder};
    let mut encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

#[test]
fn loads_plain_and_gzip_feeds() -> Result<()> {
    let plain = std::fs::read(fixture_path())?;
    let expected = Catalog::load_path(&fixture_path())?;
    assert_eq!(expected.len(), 9);

    let dir = tempfile::tempdir()?;
    let gz_path = dir.path().join("skins.json.gz");
    std::fs::write(&gz_path, gzip(&plain)?)?;
    assert_eq!(Catalog::load_path(&gz_path)?, expected);

    // Gzip content is detected even without the extension.
    let disguised = dir.path().join("skins.json");
    std::fs::write(&disguised, gzip(&plain)?)?;
    assert_eq!(Catalog::load(&FeedSource::Path(disguised))?, expected);
    Ok(())
}

#[test]
fn malformed_optional_fields_do_not_drop_items() -> Result<()> {
    let feed = br##"[
        { "name": "AK-47 | Redline", "rarity": "Classified" },
        { "name": "Glock-18 | Fade", "weapon": "Glock-18", "image": 5 },
        { "name": "M4A4 | Howl", "rarity": { "name": "Contraband", "color": "#e4ae39" } }
    ]"##;
    let catalog = Catalog::from_bytes(feed, FeedFormat::Json)?;

    let names: Vec<&str> = catalog.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["AK-47 | Redline", "Glock-18 | Fade", "M4A4 | Howl"]);
    assert_eq!(catalog.items()[0].rarity_name(), None);
    assert_eq!(catalog.items()[1].weapon_name(), None);
    assert_eq!(catalog.items()[1].image(), "");
    assert_eq!(catalog.items()[2].rarity_name(), Some("Contraband"));

    // Still searchable and groupable with the fallbacks.
    assert_eq!(catalog.search("glock").len(), 1);
    let groups = skindex::group_for_render(catalog.items());
    assert_eq!(groups.item_count(), 3);
    Ok(())
}

#[test]
fn unreadable_entries_are_skipped() -> Result<()> {
    let feed = br#"[ 42, { "name": 7 }, { "name": "P250 | Sand Dune" } ]"#;
    let catalog = Catalog::from_bytes(feed, FeedFormat::Json)?;
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.items()[0].name, "P250 | Sand Dune");
    Ok(())
}

#[test]
fn malformed_feed_is_a_json_error() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"{ \"not\": \"an array\" }")?;

    let err = Catalog::load_path(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)), "got {err:?}");
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Catalog::load_path(Path::new("no/such/skins.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
}

#[test]
fn background_load_delivers_one_result() -> Result<()> {
    let rx = skindex::spawn_load(FeedSource::Path(fixture_path()));
    let catalog = rx.recv()??;
    assert_eq!(catalog.len(), 9);
    assert!(rx.recv().is_err());
    Ok(())
}

#[test]
fn shared_knife_panel_needs_two_cases() -> Result<()> {
    let catalog = Catalog::load_path(&fixture_path())?;

    let chroma = catalog.collection("Chroma Case");
    let panel = SharedKnifeCases
        .related(&catalog, "Chroma Case", &chroma)
        .ok_or("expected a related panel")?;
    let links: Vec<(&str, bool)> = panel
        .links
        .iter()
        .map(|l| (l.name.as_str(), l.current))
        .collect();
    assert_eq!(links, [("Chroma 2 Case", false), ("Chroma Case", true)]);
    assert_eq!(panel.links[0].location, "?collection=Chroma+2+Case");

    // The Bowie Knife only drops from the Falchion Case.
    let falchion = catalog.collection("Falchion Case");
    assert!(
        SharedKnifeCases
            .related(&catalog, "Falchion Case", &falchion)
            .is_none()
    );

    // No knives, no panel.
    let dust = catalog.collection("The Dust 2 Collection");
    assert!(
        SharedKnifeCases
            .related(&catalog, "The Dust 2 Collection", &dust)
            .is_none()
    );
    Ok(())
}

#[test]
fn feed_source_parses_urls_and_paths() {
    assert_eq!(
        FeedSource::parse(" https://example.com/skins.json "),
        FeedSource::Url("https://example.com/skins.json".to_string())
    );
    assert_eq!(
        FeedSource::parse("data/skins.json.gz"),
        FeedSource::Path(PathBuf::from("data/skins.json.gz"))
    );
}
