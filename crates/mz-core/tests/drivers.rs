mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use proptest::prelude::*;

use mz_core::generation::{Silent, generate};
use mz_core::{
    Builder, Driver, DriverError, DriverKind, GenerationRequest, INITIAL_BATTERY, MazeConfig,
    Robot, RobotError, Sensor, Session, SessionConfig,
};

use common::serpentine;

fn attached(kind: DriverKind, maze: Arc<MazeConfig>) -> (Rc<RefCell<Robot>>, Driver) {
    let robot = Rc::new(RefCell::new(Robot::new(maze)));
    let mut driver = Driver::new(kind);
    driver.attach(&robot);
    (robot, driver)
}

#[test]
fn test_serpentine_layout() {
    let maze = serpentine();
    assert_eq!(maze.starting_position(), (0, 0));
    assert_eq!(maze.exit_position(), (3, 3));
    assert_eq!(maze.distance_to_exit(0, 0), 12);
    common::assert_maze_invariants(&maze);
}

#[test]
fn test_wizard_on_serpentine() {
    let (robot, mut driver) = attached(DriverKind::Wizard, serpentine());
    assert!(driver.drive_to_exit().unwrap());
    assert_eq!(driver.path_length(), 12);

    // 12 steps, 5 quarter turns, 3 senses to look for the opening, final step
    let used = driver.energy_consumption().unwrap();
    assert_eq!(used, 12.0 * 5.0 + 5.0 * 3.0 + 3.0 + 5.0);
    assert_eq!(robot.borrow().battery_level(), INITIAL_BATTERY - 83.0);
    assert!(robot.borrow().has_escaped());
    assert_eq!(robot.borrow().position(), (3, 4));
}

#[test]
fn test_wall_follower_on_serpentine() {
    let (robot, mut driver) = attached(DriverKind::WallFollower, serpentine());
    assert!(driver.drive_to_exit().unwrap());
    assert_eq!(driver.path_length(), 12);
    assert_eq!(driver.energy_consumption().unwrap(), 111.0);
    assert!(robot.borrow().has_escaped());
}

#[test]
fn test_pledge_on_serpentine() {
    let (robot, mut driver) = attached(DriverKind::Pledge, serpentine());
    assert!(driver.drive_to_exit().unwrap());
    assert_eq!(driver.path_length(), 12);
    assert_eq!(driver.energy_consumption().unwrap(), 104.0);
    assert!(robot.borrow().has_escaped());
}

#[test]
fn test_battery_runs_out_mid_drive() {
    let (robot, mut driver) = attached(DriverKind::Wizard, serpentine());
    robot.borrow_mut().set_battery_level(15.0);
    driver.attach(&robot);

    assert!(!driver.drive_to_exit().unwrap());
    assert_eq!(driver.path_length(), 3);
    assert_eq!(driver.energy_consumption().unwrap(), 15.0);
    let robot = robot.borrow();
    assert!(robot.has_stopped());
    assert_eq!(robot.battery_level(), 0.0);
    assert_eq!(robot.current_position().unwrap(), (3, 0));
}

#[test]
fn test_missing_distance_sensor() {
    for kind in [DriverKind::WallFollower, DriverKind::Pledge] {
        let (robot, mut driver) = attached(kind, serpentine());
        robot.borrow_mut().remove_sensor(Sensor::Distance);
        assert_eq!(
            driver.drive_to_exit(),
            Err(DriverError::Robot(RobotError::MissingSensor(Sensor::Distance)))
        );
        assert_eq!(robot.borrow().battery_level(), INITIAL_BATTERY);
        assert_eq!(driver.energy_consumption().unwrap(), 0.0);
    }
}

#[test]
fn test_wizard_needs_no_sensor_until_exit() {
    let (robot, mut driver) = attached(DriverKind::Wizard, serpentine());
    robot.borrow_mut().remove_sensor(Sensor::Distance);
    assert!(matches!(
        driver.drive_to_exit(),
        Err(DriverError::Robot(RobotError::MissingSensor(Sensor::Distance)))
    ));
    assert!(robot.borrow().is_at_exit());
    assert_eq!(driver.path_length(), 12);
}

#[test]
fn test_session_with_config() {
    let config = SessionConfig {
        driver: DriverKind::Pledge,
        ..SessionConfig::default()
    };
    let mut session = Session::new(serpentine(), &config);
    assert!(session.drive().unwrap());
    let snap = session.snapshot();
    assert_eq!(snap.driver, DriverKind::Pledge);
    assert_eq!(snap.path_length, 12);
    assert_eq!(snap.energy_consumption, 104.0);
}

/// Room mazes have loops, which trap plain wall following but not Pledge
#[test]
fn test_pledge_escapes_room_mazes() {
    for builder in [Builder::Dfs, Builder::Prim, Builder::Eller] {
        for seed in 0..12 {
            let request = GenerationRequest::new(builder, 10, 10)
                .with_rooms(3)
                .with_seed(seed);
            let maze = Arc::new(generate(&request, &mut Silent).unwrap());
            assert!(!maze.cells().rooms().is_empty(), "{builder} seed {seed}");

            let robot = Rc::new(RefCell::new(Robot::new(maze)));
            robot.borrow_mut().set_battery_level(1_000_000.0);
            let mut driver = Driver::new(DriverKind::Pledge);
            driver.attach(&robot);

            assert!(driver.drive_to_exit().unwrap(), "{builder} seed {seed}");
            assert!(robot.borrow().has_escaped());
        }
    }
}

fn driver_strategy() -> impl Strategy<Value = DriverKind> {
    prop_oneof![
        Just(DriverKind::WallFollower),
        Just(DriverKind::Pledge),
        Just(DriverKind::Wizard),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn wizard_path_equals_start_distance(
        width in 1usize..10,
        height in 1usize..10,
        seed in any::<u64>(),
    ) {
        let request = GenerationRequest::new(Builder::Dfs, width, height).with_seed(seed);
        let maze = Arc::new(generate(&request, &mut Silent).unwrap());
        let (sx, sy) = maze.starting_position();
        let expected = maze.distance_to_exit(sx, sy);

        let (robot, mut driver) = attached(DriverKind::Wizard, Arc::clone(&maze));
        prop_assert!(driver.drive_to_exit().unwrap());
        prop_assert_eq!(driver.path_length(), expected);
        prop_assert!(robot.borrow().has_escaped());
    }

    #[test]
    fn drivers_terminate_and_account_energy(
        kind in driver_strategy(),
        width in 2usize..9,
        height in 2usize..9,
        seed in any::<u64>(),
    ) {
        let request = GenerationRequest::new(Builder::Prim, width, height).with_seed(seed);
        let maze = Arc::new(generate(&request, &mut Silent).unwrap());
        let (sx, sy) = maze.starting_position();
        let shortest = maze.distance_to_exit(sx, sy);

        let (robot, mut driver) = attached(kind, maze);
        let escaped = driver.drive_to_exit().unwrap();

        let battery = robot.borrow().battery_level();
        prop_assert_eq!(driver.energy_consumption().unwrap(), driver.starting_energy() - battery);
        prop_assert!(battery >= 0.0);
        if escaped {
            prop_assert!(driver.path_length() >= shortest);
        } else {
            prop_assert!(robot.borrow().has_stopped());
        }
    }

    #[test]
    fn drivers_terminate_in_room_mazes(
        kind in prop_oneof![Just(DriverKind::WallFollower), Just(DriverKind::Pledge)],
        builder in prop_oneof![Just(Builder::Dfs), Just(Builder::Prim), Just(Builder::Eller)],
        rooms in 1usize..4,
        seed in any::<u64>(),
    ) {
        let request = GenerationRequest::new(builder, 12, 12)
            .with_rooms(rooms)
            .with_seed(seed);
        let maze = Arc::new(generate(&request, &mut Silent).unwrap());

        let (robot, mut driver) = attached(kind, maze);
        let escaped = driver.drive_to_exit().unwrap();

        let battery = robot.borrow().battery_level();
        prop_assert_eq!(driver.energy_consumption().unwrap(), driver.starting_energy() - battery);
        prop_assert!(battery >= 0.0);
        prop_assert!(escaped || robot.borrow().has_stopped());
    }
}
