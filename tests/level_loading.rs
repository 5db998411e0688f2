//! Loading levels from disk and playing them through.
use golfram::{Entity, Level, LevelError, SimConfig, StepResult, Tile, Vector2};
use rstest::{fixture, rstest};

const PUTT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/putt.json");

#[fixture]
fn putt() -> Level {
    Level::load(PUTT).expect("fixture level loads")
}

#[rstest]
fn loads_layout_and_tiles(putt: Level) {
    assert_eq!(putt.display_name(), "straight putt");
    let grid = putt.build_grid(&SimConfig::default()).expect("valid level");
    assert_eq!((grid.width(), grid.height()), (4, 2));
    assert_eq!(grid.tile_at(0, 3), Ok(&Tile::cup()));
    assert!(matches!(grid.tile_at(1, 0), Ok(Tile::Boost(_))));
    assert_ne!(grid.cell_at(1, 0), grid.cell_at(1, 1));
}

#[rstest]
fn a_well_judged_putt_drops(putt: Level) {
    let config = SimConfig::default();
    let grid = putt.build_grid(&config).expect("valid level");
    let start = putt.start_position(&grid).expect("pixels convert");
    let mut stepper = config.stepper(grid);
    let ball = stepper
        .watch(Entity::ball(start).with_velocity(Vector2::new(0.9, 0.0)))
        .expect("start is on the course");

    let mut outcome = StepResult::Running;
    for _ in 0..600 {
        outcome = stepper
            .tick_frame(config.frame_dt(), config.substeps, &mut ())
            .expect("valid step");
        if !outcome.is_running() {
            break;
        }
    }
    assert_eq!(outcome, StepResult::LevelComplete(ball));
}

#[test]
fn missing_files_report_io_errors() {
    assert!(matches!(
        Level::load("tests/data/does-not-exist.json"),
        Err(LevelError::Io { .. })
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        Level::from_json_str(r#"{ "default": "." "#),
        Err(LevelError::Parse(_))
    ));
}

#[test]
fn settings_override_the_tile_size() {
    let level = Level::from_json_str(
        r#"{ "default": ".", "tiles": { ".": { "kind": "friction" } }, "rows": ["."] }"#,
    )
    .expect("valid json");
    let config = SimConfig::from_json_str(r#"{ "tile_size": 32 }"#).expect("valid settings");
    let grid = level.build_grid(&config).expect("valid level");
    assert_eq!(grid.tile_size(), 32);
}
