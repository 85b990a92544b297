//! Demand sensors derived from the vehicle registry
//!
//! Readings are recomputed on demand and never cached across ticks.

use super::types::{Axis, VehicleId};
use super::vehicle::SimVehicle;

/// Per-axis demand and emergency presence at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorReading {
    pub ns_count: usize,
    pub ew_count: usize,
    /// Axis and id of the earliest-registered unpassed emergency vehicle
    pub first_emergency: Option<(VehicleId, Axis)>,
}

impl SensorReading {
    /// Scan the vehicles in registry order
    pub fn from_vehicles(vehicles: &[SimVehicle]) -> Self {
        let mut reading = SensorReading::default();

        for vehicle in vehicles.iter().filter(|v| !v.passed()) {
            let axis = vehicle.direction().axis();
            match axis {
                Axis::NorthSouth => reading.ns_count += 1,
                Axis::EastWest => reading.ew_count += 1,
            }

            if vehicle.is_emergency() && reading.first_emergency.is_none() {
                reading.first_emergency = Some((vehicle.id, axis));
            }
        }

        reading
    }

    pub fn has_emergency(&self) -> bool {
        self.first_emergency.is_some()
    }

    pub fn count_for(&self, axis: Axis) -> usize {
        match axis {
            Axis::NorthSouth => self.ns_count,
            Axis::EastWest => self.ew_count,
        }
    }
}
