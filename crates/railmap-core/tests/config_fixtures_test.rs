use railmap_core::{Color, ConfigFormat, Error, MapConfig};
use std::path::{Path, PathBuf};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .join("fixtures")
}

fn load(name: &str) -> MapConfig {
    let path = fixtures_root().join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    MapConfig::from_str_with_format(&text, ConfigFormat::from_path(&path))
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

#[test]
fn basic_fixture_is_used_unscaled() {
    let cfg = load("basic.json");
    assert_eq!(cfg.scale_factor().unwrap(), 1.0);
    let map = cfg.build_map().unwrap();
    map.validate().unwrap();
    let a = map.city("City A").unwrap();
    assert_eq!((a.position.x, a.position.y), (10.0, 10.0));
    assert_eq!(map.connections().len(), 1);
    assert_eq!(map.connections()[0].length, 3);
    assert_eq!(map.connections()[0].primary, Color::Grey);
    assert!(!map.connections()[0].is_dual());
}

#[test]
fn network_fixture_scales_onto_the_sheet() {
    let cfg = load("network.yaml");
    // 279.4 x 215.9 units over 400 x 300: width binds.
    let scale = cfg.scale_factor().unwrap();
    assert!((scale - 279.4 / 400.0).abs() < 1e-12);

    let map = cfg.build_map().unwrap();
    map.validate().unwrap();
    let names: Vec<&str> = map.cities().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        ["Harbor", "Mill Town", "Summit", "Junction", "Coast & Co"]
    );
    let coast = map.city("Coast & Co").unwrap();
    assert!((coast.position.x - 370.0 * scale).abs() < 1e-9);
    assert!((coast.position.y - 270.0 * scale).abs() < 1e-9);

    let dual: Vec<String> = map
        .connections()
        .iter()
        .filter(|c| c.is_dual())
        .map(|c| c.id())
        .collect();
    assert_eq!(dual, ["Harbor--Mill Town", "Summit--Junction"]);
}

#[test]
fn dangling_fixture_parses_but_fails_validation() {
    let cfg = load("dangling.json");
    let map = cfg.build_map().unwrap();
    let err = map.validate().unwrap_err();
    match err {
        Error::DanglingReference { connection, city } => {
            assert_eq!(connection, "City A--City C");
            assert_eq!(city, "City C");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn yaml_text_fed_to_the_json_reader_is_a_json_error() {
    let text = std::fs::read_to_string(fixtures_root().join("network.yaml")).unwrap();
    let err = MapConfig::from_str_with_format(&text, ConfigFormat::Json).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}
