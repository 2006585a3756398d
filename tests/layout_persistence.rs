//! Layout files on disk: save, load, and older record shapes.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use ricochet::{
    Color, Direction, GeneratorConfig, Layout, LayoutError, SolverConfig, Symmetry, generate,
};
use tempfile::tempdir;

fn sample() -> Layout {
    let mut layout = Layout::new(7, 5).unwrap();
    layout.place_robot(Color::Red, Some(0)).unwrap();
    layout.place_robot(Color::Yellow, Some(34)).unwrap();
    layout.place_target(Color::Red, Some(17)).unwrap();
    layout.place_target(Color::Blue, Some(9)).unwrap();
    layout
        .toggle_walls(
            8,
            Direction::East,
            Symmetry {
                mirror_x: true,
                mirror_y: false,
                mirror_xy: false,
            },
        )
        .unwrap();
    layout.set_moves(Some(6));
    layout
}

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("layout.json");
    let layout = sample();
    layout.save(&path).unwrap();

    let loaded = Layout::load(&path).unwrap();
    assert_eq!(loaded.board().width(), 7);
    assert_eq!(loaded.board().height(), 5);
    assert_eq!(loaded.board().masks(), layout.board().masks());
    assert_eq!(loaded.robots(), layout.robots());
    assert_eq!(loaded.targets(), layout.targets());
    assert_eq!(loaded.moves(), Some(6));
    assert_eq!(loaded, layout);
}

#[test]
fn test_file_uses_record_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("layout.json");
    sample().save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["width"], 7);
    assert_eq!(value["grid"].as_array().unwrap().len(), 35);
    assert_eq!(value["robots"], serde_json::json!([0, -1, -1, 34]));
    assert_eq!(value["targets"], serde_json::json!([17, -1, 9, -1]));
    assert_eq!(value["moves"], 6);
}

#[test]
fn test_load_legacy_tokens_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("old.json");
    let grid: Vec<u8> = Layout::new(3, 3).unwrap().board().masks();
    let text = serde_json::json!({
        "width": 3,
        "height": 3,
        "grid": grid,
        "robots": [4, -1, -1, -1],
        "tokens": [8, -1, -1, -1],
        "moves": -1,
    });
    std::fs::write(&path, text.to_string()).unwrap();

    let layout = Layout::load(&path).unwrap();
    assert_eq!(layout.target(Color::Red), Some(8));
    assert_eq!(layout.moves(), None);
    assert!(layout.is_valid());
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = Layout::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(LayoutError::Io(_))));
}

#[test]
fn test_generated_layout_survives_disk() {
    let config = GeneratorConfig {
        width: 4,
        height: 4,
        steps: 10,
        solver: SolverConfig { max_depth: 8 },
        max_rerolls: 200,
        seed: 21,
        ..GeneratorConfig::default()
    };
    let generated = generate(None, &config).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("generated.json");
    generated.layout.save(&path).unwrap();
    let loaded = Layout::load(&path).unwrap();

    assert_eq!(loaded, generated.layout);
    assert!(loaded.validate_complete().is_ok());
    assert_eq!(loaded.moves(), Some(generated.moves));
}
