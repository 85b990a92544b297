//! Main simulation world that ties everything together
//!
//! `SimWorld` owns the whole simulation state. A host drives it either by
//! calling `advance` with elapsed wall time or by invoking the individual
//! tick handlers directly.

use log::{debug, info, warn};

use super::phase_controller::{DecisionReason, LightState, Phase, PhaseController, PhaseTransition};
use super::scheduler::{Scheduler, Trigger, DEFAULT_FRAME_MS};
use super::sensors::SensorReading;
use super::settings::{Mode, Settings};
use super::stats::SimulationStats;
use super::types::{Axis, Direction, LightColor, Position, VehicleId, EXIT_MAX, EXIT_MIN};
use super::vehicle_registry::VehicleRegistry;

/// Read-only view of a vehicle for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleView {
    pub id: VehicleId,
    pub direction: Direction,
    pub is_emergency: bool,
    pub position: Position,
    pub stopped: bool,
}

/// Everything a rendering layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SimSnapshot {
    pub running: bool,
    pub mode: Mode,
    pub emergency_mode: bool,
    pub phase: Phase,
    pub lights: LightState,
    pub timer: u32,
    pub vehicles: Vec<VehicleView>,
    pub stats: SimulationStats,
}

/// The main simulation world
pub struct SimWorld {
    /// Signal state machine
    controller: PhaseController,

    /// All active vehicles
    registry: VehicleRegistry,

    /// Periodic trigger clock
    scheduler: Scheduler,

    settings: Settings,
    mode: Mode,
    emergency_mode: bool,
    running: bool,

    /// Vehicles that have crossed since the last reset
    vehicles_passed: u64,

    /// Cached statistics, refreshed whenever vehicles or the pass counter change
    stats: SimulationStats,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(registry: VehicleRegistry, frame_ms: u64) -> Self {
        let settings = Settings::default();
        Self {
            controller: PhaseController::new(),
            registry,
            scheduler: Scheduler::new(frame_ms, settings.spawn_interval_ms()),
            settings,
            mode: Mode::default(),
            emergency_mode: false,
            running: false,
            vehicles_passed: 0,
            stats: SimulationStats::default(),
        }
    }

    pub fn new() -> Self {
        Self::new_internal(VehicleRegistry::new(), DEFAULT_FRAME_MS)
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(VehicleRegistry::new_with_seed(seed), DEFAULT_FRAME_MS)
    }

    /// Use a different motion tick interval
    pub fn with_frame_ms(mut self, frame_ms: u64) -> Self {
        self.scheduler = Scheduler::new(frame_ms, self.settings.spawn_interval_ms());
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn emergency_mode(&self) -> bool {
        self.emergency_mode
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn lights(&self) -> LightState {
        self.controller.light_state()
    }

    pub fn timer(&self) -> u32 {
        self.controller.timer()
    }

    pub fn vehicles_passed(&self) -> u64 {
        self.vehicles_passed
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Simulated milliseconds elapsed while running
    pub fn elapsed_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn controller(&self) -> &PhaseController {
        &self.controller
    }

    /// Active vehicles; spawning and removal go through the world
    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    /// Move a vehicle to a position and refresh the statistics
    ///
    /// Returns `false` when no such vehicle exists.
    #[doc(hidden)]
    pub fn place_vehicle(&mut self, id: VehicleId, position: Position) -> bool {
        let Some(vehicle) = self.registry.get_mut(id) else {
            return false;
        };
        vehicle.position = position;
        self.refresh_stats();
        true
    }

    /// Current sensor reading, derived fresh from the registry
    pub fn sensors(&self) -> SensorReading {
        SensorReading::from_vehicles(self.registry.vehicles())
    }

    /// Begin or resume running
    pub fn start(&mut self) {
        if self.running {
            return;
        }

        self.running = true;
        self.scheduler.resume(self.settings.spawn_interval_ms());

        match self.controller.start() {
            Some(transition) => {
                info!("Simulation started: {} (lights {})", transition.to, self.describe_lights());
            }
            None => info!(
                "Simulation resumed in {} at {}s",
                self.controller.phase(),
                self.controller.timer()
            ),
        }
        self.refresh_stats();
    }

    /// Halt every trigger without touching state
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        info!(
            "Simulation paused in {} at {}s",
            self.controller.phase(),
            self.controller.timer()
        );
        self.refresh_stats();
    }

    /// Return to the initial stopped state
    pub fn reset(&mut self) {
        self.running = false;
        self.controller.reset();
        self.registry.clear();
        self.vehicles_passed = 0;
        self.emergency_mode = false;
        self.scheduler.reset(self.settings.spawn_interval_ms());
        self.stats = SimulationStats::default();
        info!("Simulation reset");
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!("Mode changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Replace the settings; takes effect on the next trigger
    pub fn set_settings(&mut self, settings: Settings) {
        info!(
            "Settings updated: green={}s yellow={}s freq={} (spawn every {}ms)",
            settings.green_time,
            settings.yellow_time,
            settings.vehicle_freq,
            settings.spawn_interval_ms()
        );
        self.settings = settings;
    }

    /// Flip emergency mode; turning it on immediately attempts a spawn
    pub fn toggle_emergency_mode(&mut self) -> bool {
        self.emergency_mode = !self.emergency_mode;
        info!(
            "Emergency mode {}",
            if self.emergency_mode { "on" } else { "off" }
        );
        if self.emergency_mode {
            self.spawn_vehicle();
        }
        self.emergency_mode
    }

    /// Advance the simulated clock, firing every trigger that comes due
    pub fn advance(&mut self, delta_ms: u64) {
        if !self.running {
            return;
        }

        let until_ms = self.scheduler.now_ms() + delta_ms;
        while let Some(trigger) = self
            .scheduler
            .pop_due(until_ms, self.settings.spawn_interval_ms())
        {
            match trigger {
                Trigger::Phase => {
                    self.phase_tick();
                }
                Trigger::Motion => self.motion_tick(),
                Trigger::Spawn => {
                    self.spawn_vehicle();
                }
            }
        }
        self.scheduler.settle(until_ms);
    }

    /// One-second controller tick
    pub fn phase_tick(&mut self) -> Option<PhaseTransition> {
        if !self.running {
            return None;
        }

        let vehicles = self.registry.vehicles();
        let transition = self.controller.tick(&self.settings, self.mode, || {
            SensorReading::from_vehicles(vehicles)
        })?;

        match transition.decision {
            Some(DecisionReason::Emergency(vehicle_id)) => warn!(
                "Emergency preemption: vehicle {} gets {}",
                vehicle_id.0, transition.to
            ),
            Some(DecisionReason::Demand) => {
                let sensors = self.sensors();
                info!(
                    "Demand decision: {} (ns={}, ew={})",
                    transition.to, sensors.ns_count, sensors.ew_count
                );
            }
            _ => {}
        }
        info!(
            "Phase {} -> {} (lights {})",
            transition.from,
            transition.to,
            self.describe_lights()
        );
        Some(transition)
    }

    /// Move every vehicle against one light snapshot
    pub fn motion_tick(&mut self) {
        if !self.running {
            return;
        }

        let lights = self.controller.light_state();
        let passed = self.registry.update_vehicles(&lights);

        for vehicle_id in &passed {
            debug!("Vehicle {} passed the intersection", vehicle_id.0);
        }
        self.vehicles_passed += passed.len() as u64;
        self.refresh_stats();
    }

    /// Spawn trigger; ignored while paused or at capacity
    pub fn spawn_vehicle(&mut self) -> Option<VehicleId> {
        if !self.running {
            return None;
        }

        let Some(vehicle_id) = self.registry.spawn(self.emergency_mode) else {
            debug!(
                "Spawn dropped: {} vehicles at the intersection",
                self.registry.len()
            );
            return None;
        };

        if let Some(vehicle) = self.registry.get(vehicle_id) {
            debug!(
                "Spawned {} {} at ({:.0}, {:.0})",
                if vehicle.is_emergency() { "emergency vehicle" } else { "vehicle" },
                vehicle_id.0,
                vehicle.position.x,
                vehicle.position.y
            );
        }
        self.refresh_stats();
        Some(vehicle_id)
    }

    /// Spawn a specific vehicle, bypassing the random choice
    pub fn spawn_vehicle_with(
        &mut self,
        direction: Direction,
        is_emergency: bool,
    ) -> Option<VehicleId> {
        if !self.running {
            return None;
        }
        let vehicle_id = self.registry.spawn_with(direction, is_emergency)?;
        self.refresh_stats();
        Some(vehicle_id)
    }

    /// Recompute the statistics bundle from current state
    fn refresh_stats(&mut self) {
        self.stats =
            SimulationStats::compute(self.registry.vehicles(), self.vehicles_passed, self.running);
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            running: self.running,
            mode: self.mode,
            emergency_mode: self.emergency_mode,
            phase: self.controller.phase(),
            lights: self.controller.light_state(),
            timer: self.controller.timer(),
            vehicles: self
                .registry
                .vehicles()
                .iter()
                .map(|v| VehicleView {
                    id: v.id,
                    direction: v.direction(),
                    is_emergency: v.is_emergency(),
                    position: v.position,
                    stopped: v.stopped,
                })
                .collect(),
            stats: self.stats,
        }
    }

    fn describe_lights(&self) -> String {
        let lights = self.controller.light_state();
        format!("ns={}, ew={}", lights.ns, lights.ew)
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        let stats = &self.stats;
        println!("=== Intersection Summary ===");
        println!(
            "Time: {:.2}s, Running: {}, Mode: {}",
            self.scheduler.now_ms() as f32 / 1000.0,
            self.running,
            self.mode
        );
        println!(
            "Phase: {} ({}s), Lights: {}",
            self.controller.phase(),
            self.controller.timer(),
            self.describe_lights()
        );
        println!(
            "Traffic: NS={}, EW={}, Total={}",
            stats.ns_traffic, stats.ew_traffic, stats.total_vehicles
        );
        println!(
            "Passed: {}, Queue: {}, Avg wait: {:.1}s, Longest wait: {:.1}s",
            stats.vehicles_passed, stats.queue_length, stats.avg_wait_time, stats.longest_wait
        );
        println!(
            "Avg speed: {} km/h, Efficiency: {}%",
            stats.avg_speed, stats.efficiency
        );

        let emergencies: Vec<String> = self
            .registry
            .vehicles()
            .iter()
            .filter(|v| v.is_emergency())
            .map(|v| format!("{}({})", v.id.0, v.direction()))
            .collect();
        if !emergencies.is_empty() {
            println!("Emergency vehicles: {}", emergencies.join(", "));
        }
    }

    /// Render the intersection plane as text
    ///
    /// Each cell covers `MAP_CELL` units of the 0-100 plane plus the entry margin.
    pub fn render_map(&self) -> String {
        const MAP_CELL: f32 = 5.0;
        let size = ((EXIT_MAX - EXIT_MIN) / MAP_CELL) as usize + 1;

        let to_grid = |coordinate: f32| -> usize {
            let cell = ((coordinate - EXIT_MIN) / MAP_CELL).round();
            (cell.max(0.0) as usize).min(size - 1)
        };

        let mut grid = vec![vec![' '; size]; size];

        // Roads
        let center = to_grid(50.0);
        for i in 0..size {
            grid[i][center] = '|';
            grid[center][i] = '-';
        }
        grid[center][center] = '+';

        // Signal heads sit at the stop lines
        let lights = self.controller.light_state();
        let light_char = |color: LightColor| match color {
            LightColor::Red => 'R',
            LightColor::Yellow => 'Y',
            LightColor::Green => 'G',
        };
        for direction in Direction::ALL {
            let (low, high) = direction.stop_zone();
            let edge = match direction {
                Direction::North | Direction::West => high,
                Direction::South | Direction::East => low,
            };
            let color = light_char(lights.color_for(direction.axis()));
            let entry = direction.entry_position();
            let (row, col) = match direction.axis() {
                Axis::NorthSouth => (to_grid(edge), to_grid(entry.x)),
                Axis::EastWest => (to_grid(entry.y), to_grid(edge)),
            };
            grid[row][col] = color;
        }

        // Vehicles
        for vehicle in self.registry.vehicles() {
            let row = to_grid(vehicle.position.y);
            let col = to_grid(vehicle.position.x);
            grid[row][col] = if vehicle.is_emergency() {
                'E'
            } else if vehicle.stopped {
                'S'
            } else {
                'C'
            };
        }

        let mut out = String::new();
        for row in &grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    /// Draw a visual map of the intersection in the terminal
    pub fn draw_map(&self) {
        println!("\n=== Intersection Map ===");
        println!("Legend: C=Car, S=Stopped car, E=Emergency, R/Y/G=Signal, +=Intersection");
        println!();
        print!("{}", self.render_map());
        println!();
    }
}
