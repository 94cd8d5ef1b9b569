use grid_snake::collision::BoundaryPolicy;
use grid_snake::config::EngineConfig;
use grid_snake::engine::{GameStatus, Snapshot, TickEngine};
use grid_snake::grid::Cell;
use grid_snake::input::Direction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn ten_by_ten(boundary: BoundaryPolicy) -> EngineConfig {
    EngineConfig {
        width: 10,
        height: 10,
        initial_length: 3,
        boundary,
        food_margin: 0,
        seed: Some(42),
        ..EngineConfig::default()
    }
}

fn head(snapshot: &Snapshot) -> Cell {
    snapshot.segments[0].cell
}

#[test]
fn first_tick_on_ten_by_ten_board() {
    let mut engine = TickEngine::new(ten_by_ten(BoundaryPolicy::Wall)).expect("valid config");
    engine.place_food_at(Cell::new(0, 9)).expect("corner is free");

    let before = engine.snapshot();
    assert_eq!(head(&before), Cell::new(5, 5));
    assert_eq!(before.segments.last().map(|segment| segment.cell), Some(Cell::new(3, 5)));

    let after = engine.step();
    assert_eq!(head(&after), Cell::new(6, 5));
    assert_eq!(after.segments.len(), 3);
    assert!(!after.segments.iter().any(|segment| segment.cell == Cell::new(3, 5)));
    assert_eq!(after.status, GameStatus::Running);
}

#[test]
fn forced_food_on_first_tick_grows_and_speeds_up() {
    let mut engine = TickEngine::new(ten_by_ten(BoundaryPolicy::Wall)).expect("valid config");
    engine.place_food_at(Cell::new(6, 5)).expect("cell is free");

    let snapshot = engine.step();

    assert_eq!(snapshot.segments.len(), 4);
    assert_eq!(snapshot.tick_interval_ms, 245);
    assert_eq!(snapshot.score, 100);
    assert_eq!(snapshot.status, GameStatus::Running);
}

#[test]
fn wrapping_off_the_right_edge() {
    let mut engine = TickEngine::new(ten_by_ten(BoundaryPolicy::Wrap)).expect("valid config");
    engine.place_food_at(Cell::new(5, 0)).expect("cell is free");

    for _ in 0..4 {
        engine.step();
    }
    assert_eq!(engine.snake().head(), Cell::new(9, 5));

    let snapshot = engine.step();
    assert_eq!(head(&snapshot), Cell::new(0, 5));
    assert_eq!(snapshot.status, GameStatus::Running);
}

#[test]
fn reversal_never_changes_committed_direction() {
    let mut engine = TickEngine::new(ten_by_ten(BoundaryPolicy::Wrap)).expect("valid config");
    engine.place_food_at(Cell::new(0, 0)).expect("corner is free");

    assert!(!engine.set_intended_direction(Direction::Left));
    let snapshot = engine.step();
    assert_eq!(snapshot.segments[0].direction, Direction::Right);
    assert_eq!(head(&snapshot), Cell::new(6, 5));

    assert!(engine.set_intended_direction(Direction::Up));
    let snapshot = engine.step();
    assert_eq!(snapshot.segments[0].direction, Direction::Up);

    assert!(!engine.set_intended_direction(Direction::Down));
    let snapshot = engine.step();
    assert_eq!(snapshot.segments[0].direction, Direction::Up);
    assert_eq!(head(&snapshot), Cell::new(6, 3));
}

#[test]
fn speed_ramp_stops_at_the_floor() {
    let config = EngineConfig {
        width: 240,
        height: 8,
        initial_length: 3,
        food_margin: 0,
        seed: Some(7),
        ..EngineConfig::default()
    };
    let mut engine = TickEngine::new(config).expect("valid config");
    let mut previous_interval = engine.snapshot().tick_interval_ms;
    assert_eq!(previous_interval, 250);

    for eaten in 1..=100u32 {
        let ahead = engine.snake().next_head();
        engine.place_food_at(ahead).expect("cell ahead is free");

        let snapshot = engine.step();

        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.score, eaten * 100);
        assert_eq!(snapshot.segments.len(), 3 + eaten as usize);
        assert_eq!(snapshot.tick_interval_ms, previous_interval.saturating_sub(5).max(50));
        previous_interval = snapshot.tick_interval_ms;
    }

    assert_eq!(previous_interval, 50);
    assert_eq!(engine.tick_interval().as_millis(), 50);
}

#[test]
fn random_walk_keeps_length_and_food_invariants() {
    for seed in 0..8u64 {
        let mut engine = TickEngine::new(EngineConfig {
            width: 12,
            height: 12,
            initial_length: 4,
            boundary: BoundaryPolicy::Wrap,
            food_margin: 0,
            seed: Some(seed),
            ..EngineConfig::default()
        })
        .expect("valid config");
        let mut turns = StdRng::seed_from_u64(seed ^ 0x5eed);
        let mut previous = engine.snapshot();

        for _ in 0..2_000 {
            if turns.gen_bool(0.3) {
                let direction = match turns.gen_range(0..4) {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                engine.set_intended_direction(direction);
            }

            let snapshot = engine.step();
            if snapshot.status != GameStatus::Running {
                break;
            }

            let grew = snapshot.score > previous.score;
            let expected_len = previous.segments.len() + usize::from(grew);
            assert_eq!(snapshot.segments.len(), expected_len);

            let food = snapshot.food.as_ref().expect("running game has food");
            assert!(
                !snapshot.segments.iter().any(|segment| segment.cell == food.cell),
                "food spawned on the snake at {:?}",
                food.cell
            );

            previous = snapshot;
        }
    }
}

#[test]
fn snapshot_serializes_for_renderers() {
    let mut engine = TickEngine::new(ten_by_ten(BoundaryPolicy::Wall)).expect("valid config");
    engine.place_food_at(Cell::new(1, 2)).expect("cell is free");

    let json = serde_json::to_value(engine.snapshot()).expect("snapshot serializes");

    assert_eq!(json["segments"][0]["x"], 5);
    assert_eq!(json["segments"][0]["y"], 5);
    assert_eq!(json["segments"][0]["direction"], "right");
    assert_eq!(json["food"]["x"], 1);
    assert_eq!(json["food"]["kind"], "apple");
    assert_eq!(json["score"], 0);
    assert_eq!(json["tick_interval_ms"], 250);
    assert_eq!(json["status"], "running");
}
