//! Vehicle state and the per-tick motion rule
//!
//! Emergency and regular vehicles differ only by a constant profile.

use super::phase_controller::LightState;
use super::types::{Direction, LightColor, Position, VehicleId, WAIT_INCREMENT};

/// Result of a motion tick for a single vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleUpdateResult {
    Moved,  // Vehicle advanced along its approach
    Held,   // Vehicle is waiting at its stop line
    Passed, // Vehicle crossed the far boundary and should be removed
}

/// Constant movement characteristics of a vehicle class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProfile {
    /// Distance covered per motion tick
    pub speed: f32,
    /// Whether the vehicle ignores red lights
    pub ignores_signals: bool,
}

pub const REGULAR_PROFILE: VehicleProfile = VehicleProfile {
    speed: 1.2,
    ignores_signals: false,
};

pub const EMERGENCY_PROFILE: VehicleProfile = VehicleProfile {
    speed: 2.5,
    ignores_signals: true,
};

impl VehicleProfile {
    pub fn for_vehicle(is_emergency: bool) -> &'static VehicleProfile {
        if is_emergency {
            &EMERGENCY_PROFILE
        } else {
            &REGULAR_PROFILE
        }
    }
}

/// A vehicle approaching or crossing the intersection
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    direction: Direction,
    is_emergency: bool,
    pub position: Position,
    pub speed: f32,
    /// Cumulative time spent held at the stop line
    pub wait_time: f32,
    pub stopped: bool,
    passed: bool,
}

impl SimVehicle {
    pub fn new(id: VehicleId, direction: Direction, is_emergency: bool) -> Self {
        Self {
            id,
            direction,
            is_emergency,
            position: direction.entry_position(),
            speed: VehicleProfile::for_vehicle(is_emergency).speed,
            wait_time: 0.0,
            stopped: false,
            passed: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_emergency(&self) -> bool {
        self.is_emergency
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn profile(&self) -> &'static VehicleProfile {
        VehicleProfile::for_vehicle(self.is_emergency)
    }

    /// Whether the vehicle sits inside the stop band of its approach
    pub fn in_stop_zone(&self) -> bool {
        let (low, high) = self.direction.stop_zone();
        let coordinate = self.direction.travel_coordinate(self.position);
        coordinate >= low && coordinate <= high
    }

    /// Whether the vehicle must hold this tick under the given lights
    pub fn should_stop(&self, lights: &LightState) -> bool {
        if self.profile().ignores_signals {
            return false;
        }

        lights.color_for(self.direction.axis()) != LightColor::Green && self.in_stop_zone()
    }

    /// Advance the vehicle by one motion tick
    pub fn update(&mut self, lights: &LightState) -> VehicleUpdateResult {
        if self.passed {
            return VehicleUpdateResult::Passed;
        }

        if self.should_stop(lights) {
            self.stopped = true;
            self.wait_time += WAIT_INCREMENT;
            return VehicleUpdateResult::Held;
        }

        let next = self.direction.advance(self.position, self.speed);
        if self.direction.has_exited(next) {
            self.passed = true;
            return VehicleUpdateResult::Passed;
        }

        self.position = next;
        self.stopped = false;
        VehicleUpdateResult::Moved
    }
}
