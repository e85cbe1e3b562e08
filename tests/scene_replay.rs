//! Replaying scene files end to end

use dragfence::{report, replay_str, EngineConfig, Scene};
use pretty_assertions::assert_eq;

#[test]
fn test_wall_and_edge_report() {
    let source = include_str!("scene-fixtures/wall-and-edge.toml");
    let report = replay_str(source, EngineConfig::default()).expect("Should replay");
    insta::assert_snapshot!(report, @r#"
      1 pointer 50.00,0.00     -> 10.00,0.00 [10.00 0.00 20.00 10.00] x:wall y:-
      2 pointer 50.00,40.00    -> 40.00,40.00 [50.00 40.00 60.00 50.00] x:- y:-
      3 pointer 0.00,40.00     -> -50.00,0.00 [0.00 40.00 10.00 50.00] x:- y:-
      4 pointer -20.00,40.00   -> 0.00,0.00 [0.00 40.00 10.00 50.00] x:area y:-
    released at [0.00 40.00 10.00 50.00] moved 0.00,40.00
    "#);
}

#[test]
fn test_sticky_header_report() {
    let source = include_str!("scene-fixtures/sticky-header.toml");
    let report = replay_str(source, EngineConfig::default()).expect("Should replay");
    insta::assert_snapshot!(report, @r#"
      1 scroll 0.00,200.00     -> 0.00,200.00 [10.00 300.00 60.00 350.00] x:- y:-
      2 pointer 0.00,-200.00   -> 0.00,-70.00 [10.00 230.00 60.00 280.00] x:- y:area
      3 move_by 0.00,25.00     -> 0.00,25.00 [10.00 255.00 60.00 305.00] x:- y:-
    released at [10.00 255.00 60.00 305.00] moved 0.00,155.00
    "#);
}

#[test]
fn test_sticky_obstacle_report() {
    let source = include_str!("scene-fixtures/sticky-obstacle.toml");
    let report = replay_str(source, EngineConfig::default()).expect("Should replay");
    insta::assert_snapshot!(report, @r#"
      1 scroll 0.00,200.00     -> 0.00,200.00 [10.00 300.00 60.00 350.00] x:- y:-
      2 pointer 0.00,-200.00   -> 0.00,-70.00 [10.00 230.00 60.00 280.00] x:- y:header
      3 scroll 0.00,0.00       -> 0.00,-200.00 [10.00 30.00 60.00 80.00] x:- y:header
    released at [10.00 30.00 60.00 80.00] moved 0.00,-70.00
    "#);
}

#[test]
fn test_lint_problems_report() {
    let source = include_str!("scene-fixtures/lint-problems.toml");
    let config = EngineConfig::default().with_diagnostics(true);
    let report = replay_str(source, config).expect("Should replay");
    insta::assert_snapshot!(report, @r#"
      1 pointer 5.00,0.00      -> 0.00,0.00 [0.00 0.00 40.00 40.00] x:area y:-
    released at [0.00 0.00 40.00 40.00] moved 0.00,0.00
    warning: area-too-small: area "area" is 30.00px wide but the element needs 40.00px
    warning: invalid-obstacle: obstacle "divider" (#divider) has zero area and will be ignored
    warning: obstacle-overlap: obstacles "left-bin" (#left-bin) and "right-bin" (#right-bin) overlap by 10.00x20.00px
    "#);
}

#[test]
fn test_lint_disabled_no_warnings() {
    let source = include_str!("scene-fixtures/lint-problems.toml");
    let scene = Scene::from_str(source).expect("Should load");
    let replay = scene.replay(EngineConfig::default()).expect("Should replay");
    assert!(report::distinct_warnings(&replay).is_empty());
}

#[test]
fn test_replay_is_repeatable() {
    let source = include_str!("scene-fixtures/sticky-header.toml");
    let scene = Scene::from_str(source).expect("Should load");
    let first = scene.replay(EngineConfig::default()).expect("Should replay");
    let second = scene.replay(EngineConfig::default()).expect("Should replay");
    assert_eq!(first, second);
}

#[test]
fn test_precision_from_config_file() {
    let config = EngineConfig::from_str("precision = 0\ndiagnostics = true").expect("Should parse");
    assert_eq!(config.precision, 0);
    assert!(config.diagnostics);
    assert!(!config.markers);

    let source = include_str!("scene-fixtures/wall-and-edge.toml");
    let report = replay_str(source, config).expect("Should replay");
    assert!(report.starts_with("  1 pointer 50.00,0.00     -> 10.00,0.00"));
}

#[test]
fn test_scene_file_loading() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/scene-fixtures/wall-and-edge.toml");
    let scene = Scene::from_file(&path).expect("Should load");
    assert_eq!(scene.samples.len(), 4);

    let missing = Scene::from_file(std::path::Path::new("tests/scene-fixtures/missing.toml"));
    assert!(matches!(missing, Err(dragfence::SceneError::IoError(_))));
}
