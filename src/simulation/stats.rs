//! Live metrics derived from the registry and the pass counter

use ordered_float::OrderedFloat;

use super::sensors::SensorReading;
use super::vehicle::SimVehicle;

/// Average speed reported while the simulation runs
///
/// A display constant, not a measurement of vehicle speeds.
pub const REPORTED_AVG_SPEED: u32 = 35;

/// Statistics bundle exposed to rendering layers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationStats {
    pub ns_traffic: usize,
    pub ew_traffic: usize,
    pub total_vehicles: usize,
    pub vehicles_passed: u64,
    /// Mean wait over current vehicles, one decimal place
    pub avg_wait_time: f32,
    pub longest_wait: f32,
    pub avg_speed: u32,
    pub queue_length: usize,
    /// Percentage of seen vehicles that have already crossed
    pub efficiency: u32,
}

impl SimulationStats {
    pub fn compute(vehicles: &[SimVehicle], vehicles_passed: u64, running: bool) -> Self {
        let sensors = SensorReading::from_vehicles(vehicles);
        let active: Vec<&SimVehicle> = vehicles.iter().filter(|v| !v.passed()).collect();

        let total_wait: f32 = active.iter().map(|v| v.wait_time).sum();
        let avg_wait_time = if active.is_empty() {
            0.0
        } else {
            round_to_tenth(total_wait / active.len() as f32)
        };

        let longest_wait = active
            .iter()
            .map(|v| OrderedFloat(v.wait_time))
            .max()
            .map(OrderedFloat::into_inner)
            .unwrap_or(0.0);

        Self {
            ns_traffic: sensors.ns_count,
            ew_traffic: sensors.ew_count,
            total_vehicles: active.len(),
            vehicles_passed,
            avg_wait_time,
            longest_wait,
            avg_speed: if running { REPORTED_AVG_SPEED } else { 0 },
            queue_length: active.iter().filter(|v| v.stopped).count(),
            efficiency: efficiency(vehicles_passed, active.len()),
        }
    }
}

/// Share of vehicles that have crossed, as a whole percentage capped at 100
pub fn efficiency(vehicles_passed: u64, active: usize) -> u32 {
    if vehicles_passed == 0 {
        return 0;
    }
    let seen = vehicles_passed as f64 + active as f64;
    let percent = (vehicles_passed as f64 / seen * 100.0).round();
    percent.min(100.0) as u32
}

fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
