//! Motion model, vehicle registry and sensor tests

use intersection_sim::simulation::{
    Axis, Direction, Phase, Position, SensorReading, SimVehicle, VehicleId, VehicleRegistry,
    VehicleUpdateResult, EMERGENCY_PROFILE, MAX_VEHICLES, REGULAR_PROFILE, WAIT_INCREMENT,
};

fn vehicle_at(id: u64, direction: Direction, is_emergency: bool, x: f32, y: f32) -> SimVehicle {
    let mut vehicle = SimVehicle::new(VehicleId(id), direction, is_emergency);
    vehicle.position = Position::new(x, y);
    vehicle
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_new_vehicle_enters_at_fixed_position() {
    let north = SimVehicle::new(VehicleId(0), Direction::North, false);
    assert_eq!(north.position, Position::new(48.0, -10.0));
    assert_eq!(north.speed, REGULAR_PROFILE.speed);
    assert_eq!(north.wait_time, 0.0);
    assert!(!north.stopped);
    assert!(!north.passed());

    let west = SimVehicle::new(VehicleId(1), Direction::West, true);
    assert_eq!(west.position, Position::new(-10.0, 52.0));
    assert_eq!(west.speed, EMERGENCY_PROFILE.speed);
    assert!(EMERGENCY_PROFILE.speed > REGULAR_PROFILE.speed);
}

#[test]
fn test_emergency_vehicle_ignores_red_light() {
    let lights = Phase::EwGreen.light_state();
    let mut ambulance = vehicle_at(0, Direction::North, true, 48.0, 37.0);
    assert!(ambulance.in_stop_zone());

    let result = ambulance.update(&lights);
    assert_eq!(result, VehicleUpdateResult::Moved);
    assert!(!ambulance.stopped);
    assert!(approx_eq(ambulance.position.y, 39.5));
    assert_eq!(ambulance.wait_time, 0.0);
}

#[test]
fn test_regular_vehicle_waits_at_red_until_green() {
    let red = Phase::EwGreen.light_state();
    let mut car = vehicle_at(0, Direction::South, false, 52.0, 62.0);

    let mut last_wait = car.wait_time;
    for _ in 0..5 {
        assert_eq!(car.update(&red), VehicleUpdateResult::Held);
        assert!(car.stopped);
        assert!(car.wait_time > last_wait);
        assert!(approx_eq(car.position.y, 62.0));
        last_wait = car.wait_time;
    }
    assert!(approx_eq(car.wait_time, 5.0 * WAIT_INCREMENT));

    let green = Phase::NsGreen.light_state();
    assert_eq!(car.update(&green), VehicleUpdateResult::Moved);
    assert!(!car.stopped);
    assert!(approx_eq(car.position.y, 60.8));
    assert!(approx_eq(car.wait_time, last_wait));
}

#[test]
fn test_yellow_is_not_green() {
    let lights = Phase::EwYellow.light_state();
    let mut car = vehicle_at(0, Direction::East, false, 62.0, 48.0);
    assert_eq!(car.update(&lights), VehicleUpdateResult::Held);
    assert!(car.stopped);
}

#[test]
fn test_vehicle_outside_stop_zone_keeps_moving_on_red() {
    let red = Phase::NsGreen.light_state();

    // Approaching, not yet in the zone
    let mut approaching = vehicle_at(0, Direction::West, false, 30.0, 52.0);
    assert_eq!(approaching.update(&red), VehicleUpdateResult::Moved);
    assert!(approx_eq(approaching.position.x, 31.2));

    // Already past the stop line
    let mut inside = vehicle_at(1, Direction::West, false, 45.0, 52.0);
    assert_eq!(inside.update(&red), VehicleUpdateResult::Moved);
    assert!(approx_eq(inside.position.x, 46.2));
}

#[test]
fn test_stop_zones_are_direction_specific() {
    let cases = [
        (Direction::North, Position::new(48.0, 35.0), true),
        (Direction::North, Position::new(48.0, 62.0), false),
        (Direction::South, Position::new(52.0, 65.0), true),
        (Direction::South, Position::new(52.0, 38.0), false),
        (Direction::East, Position::new(60.0, 48.0), true),
        (Direction::East, Position::new(36.0, 48.0), false),
        (Direction::West, Position::new(40.0, 52.0), true),
        (Direction::West, Position::new(63.0, 52.0), false),
    ];
    for (direction, position, expected) in cases {
        let vehicle = vehicle_at(0, direction, false, position.x, position.y);
        assert_eq!(
            vehicle.in_stop_zone(),
            expected,
            "{} at ({}, {})",
            direction,
            position.x,
            position.y
        );
    }
}

#[test]
fn test_vehicle_passes_beyond_far_boundary() {
    let lights = Phase::NsGreen.light_state();
    let mut car = vehicle_at(0, Direction::West, false, 109.5, 52.0);
    assert_eq!(car.update(&lights), VehicleUpdateResult::Passed);
    assert!(car.passed());

    // Passed stays passed
    assert_eq!(car.update(&lights), VehicleUpdateResult::Passed);
    assert!(car.passed());
}

#[test]
fn test_direction_never_changes_while_moving() {
    let lights = Phase::EwGreen.light_state();
    let mut car = SimVehicle::new(VehicleId(0), Direction::East, false);
    while car.update(&lights) != VehicleUpdateResult::Passed {
        assert_eq!(car.direction(), Direction::East);
        assert!(approx_eq(car.position.y, 48.0));
    }
    assert_eq!(car.direction(), Direction::East);
}

#[test]
fn test_registry_assigns_increasing_ids() {
    let mut registry = VehicleRegistry::new_with_seed(3);
    let mut last: Option<VehicleId> = None;
    for _ in 0..20 {
        let id = registry.spawn(false).expect("below capacity");
        if let Some(previous) = last {
            assert!(id > previous);
        }
        last = Some(id);
    }
    assert_eq!(registry.len(), 20);
}

#[test]
fn test_registry_drops_spawns_over_capacity() {
    let mut registry = VehicleRegistry::new();
    for _ in 0..=MAX_VEHICLES {
        assert!(registry.spawn_with(Direction::North, false).is_some());
    }
    assert!(registry.is_at_capacity());
    assert!(registry.spawn_with(Direction::South, false).is_none());
    assert!(registry.spawn(true).is_none());
    assert_eq!(registry.len(), MAX_VEHICLES + 1);
}

#[test]
fn test_forced_emergency_spawns() {
    let mut registry = VehicleRegistry::new_with_seed(11);
    for _ in 0..10 {
        let id = registry.spawn(true).expect("below capacity");
        let vehicle = registry.get(id).expect("just spawned");
        assert!(vehicle.is_emergency());
        assert_eq!(vehicle.position, vehicle.direction().entry_position());
    }
}

#[test]
fn test_seeded_registries_spawn_identically() {
    let mut first = VehicleRegistry::new_with_seed(42);
    let mut second = VehicleRegistry::new_with_seed(42);
    for _ in 0..30 {
        first.spawn(false);
        second.spawn(false);
    }
    let a: Vec<(Direction, bool)> = first
        .vehicles()
        .iter()
        .map(|v| (v.direction(), v.is_emergency()))
        .collect();
    let b: Vec<(Direction, bool)> = second
        .vehicles()
        .iter()
        .map(|v| (v.direction(), v.is_emergency()))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_update_removes_passed_vehicles_in_same_tick() {
    let mut registry = VehicleRegistry::new();
    let leaving = registry.spawn_with(Direction::North, false).unwrap();
    let staying = registry.spawn_with(Direction::East, false).unwrap();
    registry.get_mut(leaving).unwrap().position = Position::new(48.0, 109.9);

    let passed = registry.update_vehicles(&Phase::NsGreen.light_state());
    assert_eq!(passed, vec![leaving]);
    assert_eq!(registry.len(), 1);
    assert!(registry.get(leaving).is_none());
    assert!(registry.get(staying).is_some());
}

#[test]
fn test_update_holds_vehicles_at_red() {
    let mut registry = VehicleRegistry::new();
    let id = registry.spawn_with(Direction::East, false).unwrap();
    registry.get_mut(id).unwrap().position = Position::new(64.0, 48.0);

    let passed = registry.update_vehicles(&Phase::NsGreen.light_state());
    assert!(passed.is_empty());
    assert!(registry.get(id).unwrap().stopped);
}

#[test]
fn test_clear_restarts_numbering() {
    let mut registry = VehicleRegistry::new();
    registry.spawn_with(Direction::North, false);
    registry.spawn_with(Direction::South, false);
    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(
        registry.spawn_with(Direction::East, false),
        Some(VehicleId(0))
    );
}

#[test]
fn test_sensor_counts_per_axis() {
    let vehicles = vec![
        vehicle_at(0, Direction::North, false, 48.0, 0.0),
        vehicle_at(1, Direction::South, false, 52.0, 100.0),
        vehicle_at(2, Direction::South, false, 52.0, 90.0),
        vehicle_at(3, Direction::East, false, 100.0, 48.0),
    ];
    let reading = SensorReading::from_vehicles(&vehicles);
    assert_eq!(reading.ns_count, 3);
    assert_eq!(reading.ew_count, 1);
    assert_eq!(reading.count_for(Axis::NorthSouth), 3);
    assert!(!reading.has_emergency());
}

#[test]
fn test_sensor_reports_earliest_emergency() {
    let vehicles = vec![
        vehicle_at(0, Direction::North, false, 48.0, 0.0),
        vehicle_at(1, Direction::West, true, 0.0, 52.0),
        vehicle_at(2, Direction::South, true, 52.0, 100.0),
    ];
    let reading = SensorReading::from_vehicles(&vehicles);
    assert!(reading.has_emergency());
    assert_eq!(reading.first_emergency, Some((VehicleId(1), Axis::EastWest)));
}

#[test]
fn test_sensor_ignores_passed_vehicles() {
    let lights = Phase::EwGreen.light_state();
    let mut ambulance = vehicle_at(0, Direction::East, true, -9.0, 48.0);
    assert_eq!(ambulance.update(&lights), VehicleUpdateResult::Passed);

    let vehicles = vec![ambulance, vehicle_at(1, Direction::North, false, 48.0, 0.0)];
    let reading = SensorReading::from_vehicles(&vehicles);
    assert_eq!(reading.ew_count, 0);
    assert_eq!(reading.ns_count, 1);
    assert!(!reading.has_emergency());
}
