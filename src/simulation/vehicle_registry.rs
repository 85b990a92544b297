//! Vehicle spawning and management for the intersection simulation
//!
//! The registry keeps vehicles in arrival order so that the earliest
//! emergency vehicle is always found first.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::phase_controller::LightState;
use super::types::{Direction, VehicleId, EMERGENCY_SPAWN_CHANCE, MAX_VEHICLES};
use super::vehicle::{SimVehicle, VehicleUpdateResult};

/// All active vehicles at the intersection
#[derive(Debug, Clone)]
pub struct VehicleRegistry {
    vehicles: Vec<SimVehicle>,

    /// Next id to assign
    next_id: u64,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl Default for VehicleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            next_id: 0,
            rng: None,
        }
    }

    /// Create a registry with a seeded RNG for reproducible spawns
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
            ..Self::new()
        }
    }

    pub fn vehicles(&self) -> &[SimVehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut SimVehicle> {
        self.vehicles.iter_mut().find(|v| v.id == id)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn is_at_capacity(&self) -> bool {
        self.vehicles.len() > MAX_VEHICLES
    }

    /// Pick a random approach, using seeded RNG if available
    fn random_direction(&mut self) -> Direction {
        let choice = match &mut self.rng {
            Some(rng) => Direction::ALL.choose(rng),
            None => Direction::ALL.choose(&mut rand::rng()),
        };
        choice.copied().unwrap_or(Direction::North)
    }

    /// Roll for a random emergency vehicle, using seeded RNG if available
    fn roll_emergency(&mut self) -> bool {
        match &mut self.rng {
            Some(rng) => rng.random_bool(EMERGENCY_SPAWN_CHANCE),
            None => rand::rng().random_bool(EMERGENCY_SPAWN_CHANCE),
        }
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a vehicle on a random approach
    ///
    /// Every spawn is an emergency vehicle while `force_emergency` is set.
    /// Returns `None` when the registry is over capacity.
    pub fn spawn(&mut self, force_emergency: bool) -> Option<VehicleId> {
        if self.is_at_capacity() {
            return None;
        }

        let direction = self.random_direction();
        let is_emergency = force_emergency || self.roll_emergency();
        self.spawn_with(direction, is_emergency)
    }

    /// Spawn a vehicle with a chosen approach and class
    pub fn spawn_with(&mut self, direction: Direction, is_emergency: bool) -> Option<VehicleId> {
        if self.is_at_capacity() {
            return None;
        }

        let id = self.next_vehicle_id();
        self.vehicles.push(SimVehicle::new(id, direction, is_emergency));
        Some(id)
    }

    /// Move every vehicle against a single light snapshot and drop the ones that passed
    ///
    /// Returns the ids of the vehicles removed this tick.
    pub fn update_vehicles(&mut self, lights: &LightState) -> Vec<VehicleId> {
        let mut passed = Vec::new();

        for vehicle in &mut self.vehicles {
            if vehicle.update(lights) == VehicleUpdateResult::Passed {
                passed.push(vehicle.id);
            }
        }

        self.remove_passed();
        passed
    }

    /// Remove vehicles that have exited the intersection
    pub fn remove_passed(&mut self) -> usize {
        let before = self.vehicles.len();
        self.vehicles.retain(|v| !v.passed());
        before - self.vehicles.len()
    }

    /// Drop every vehicle and restart id numbering
    pub fn clear(&mut self) {
        self.vehicles.clear();
        self.next_id = 0;
    }
}
