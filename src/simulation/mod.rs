//! Standalone intersection simulation module
//!
//! This module contains the signal state machine, the demand sensors and the
//! vehicle motion model. It runs without any rendering layer and can be
//! driven from a console host or tests.

mod phase_controller;
mod scheduler;
mod sensors;
mod settings;
mod stats;
mod types;
mod vehicle;
mod vehicle_registry;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use phase_controller::{
    decide, Decision, DecisionReason, LightState, Phase, PhaseController, PhaseTransition,
    SMART_DEMAND_MARGIN,
};
#[allow(unused_imports)]
pub use scheduler::{Scheduler, Trigger, DEFAULT_FRAME_MS, PHASE_TICK_MS};
#[allow(unused_imports)]
pub use sensors::SensorReading;
#[allow(unused_imports)]
pub use settings::{
    Mode, Settings, DEFAULT_GREEN_TIME, DEFAULT_VEHICLE_FREQ, DEFAULT_YELLOW_TIME,
    GREEN_TIME_RANGE, MIN_SPAWN_INTERVAL_MS, VEHICLE_FREQ_RANGE, YELLOW_TIME_RANGE,
};
#[allow(unused_imports)]
pub use stats::{efficiency, SimulationStats, REPORTED_AVG_SPEED};
#[allow(unused_imports)]
pub use types::{
    Axis, Direction, LightColor, Position, VehicleId, EMERGENCY_SPAWN_CHANCE, EXIT_MAX, EXIT_MIN,
    MAX_VEHICLES, WAIT_INCREMENT,
};
#[allow(unused_imports)]
pub use vehicle::{
    SimVehicle, VehicleProfile, VehicleUpdateResult, EMERGENCY_PROFILE, REGULAR_PROFILE,
};
#[allow(unused_imports)]
pub use vehicle_registry::VehicleRegistry;
pub use world::{SimSnapshot, SimWorld, VehicleView};
