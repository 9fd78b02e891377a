use rand::{SeedableRng, rngs::StdRng};

use common::{
    config::Config,
    error::MazeError,
    layout::{self, DrawCall},
    maze::{Maze, SOUTH, WEST},
    wall::{FaceGroup, WallUnit},
};

#[test]
fn small_seeded_maze_is_a_spanning_tree_with_a_gate() {
    let maze = Maze::generate_seeded(5, 1, 2024).expect("valid parameters");

    assert_eq!(maze.masks().len(), 25);
    assert_eq!(maze.passages().len(), 24);
    assert!(maze.is_spanning_tree(), "not a spanning tree:\n{maze}");
    assert_eq!(maze.masks()[2] & SOUTH, 0, "gate under the centre is closed");

    // One corridor row: the centre column and its east neighbour keep their
    // west walls.
    assert_ne!(maze.masks()[2] & WEST, 0);
    assert_ne!(maze.masks()[3] & WEST, 0);
}

#[test]
fn generator_is_deterministic_for_a_given_rng_state() {
    let a = Maze::generate(41, 6, &mut StdRng::seed_from_u64(7)).expect("valid parameters");
    let b = Maze::generate(41, 6, &mut StdRng::seed_from_u64(7)).expect("valid parameters");
    assert_eq!(a, b);
}

#[test]
fn default_wall_unit_has_expected_groups() {
    let unit = WallUnit::compile(0.25, 1).expect("valid parameters");

    assert_eq!(unit.ranges(FaceGroup::South).len(), 4);
    // One carved column range per portioned south face, plus the post's sides.
    assert_eq!(unit.portions().len(), 3);
    assert_eq!(unit.ranges(FaceGroup::Column).len(), 3 + 2);
    for range in unit.ranges(FaceGroup::Column) {
        assert!(range.length >= 2);
    }
    for portion in unit.portions() {
        assert_eq!(
            portion.column.length + portion.remainder.length,
            portion.run.length + 2
        );
    }
}

#[test]
fn draw_plan_covers_maze_and_perimeter() {
    let maze = Maze::generate_seeded(5, 1, 99).expect("valid parameters");
    let calls: Vec<DrawCall> = layout::draw_calls(&maze);

    // Columns: every cell plus the ring. Walls: 2 per cell, minus 24
    // passages and the gate, plus one per ring position bar the corner.
    let columns = calls.iter().filter(|c| c.group == FaceGroup::Column).count();
    let walls = calls.len() - columns;
    assert_eq!(columns, 36);
    assert_eq!(walls, 50 - 25 + 10);
}

#[test]
fn config_drives_both_components() {
    let config = Config {
        side: 9,
        exit_corridor: 3,
        wall_thickness: 0.2,
        detail_level: 2,
        seed: Some(5),
    };

    let maze = Maze::from_config(&config).expect("valid parameters");
    let unit = WallUnit::from_config(&config).expect("valid parameters");

    assert_eq!(maze.side(), 9);
    assert!(maze.is_spanning_tree());
    assert_eq!(unit.wall_thickness(), 0.2);
    assert_eq!(maze, Maze::from_config(&config).expect("valid parameters"));
}

#[test]
fn invalid_configuration_aborts_startup() {
    let config = Config {
        wall_thickness: 0.5,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(MazeError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        WallUnit::from_config(&config),
        Err(MazeError::InvalidConfiguration(_))
    ));

    let config = Config {
        side: 1,
        exit_corridor: 0,
        ..Config::default()
    };
    assert!(matches!(
        Maze::from_config(&config),
        Err(MazeError::InvalidConfiguration(_))
    ));
}
