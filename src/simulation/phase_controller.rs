//! Traffic-light phase state machine
//!
//! The controller owns the current phase and the seconds timer. Light colors
//! are always derived from the phase and cannot be set independently.

use std::fmt;

use super::sensors::SensorReading;
use super::settings::{Mode, Settings};
use super::types::{Axis, LightColor, VehicleId};

/// Named controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Stopped,
    NsGreen,
    NsYellow,
    EwGreen,
    EwYellow,
}

impl Phase {
    pub fn light_state(self) -> LightState {
        use LightColor::{Green, Red, Yellow};
        match self {
            Phase::Stopped => LightState::new(Red, Red),
            Phase::NsGreen => LightState::new(Green, Red),
            Phase::NsYellow => LightState::new(Yellow, Red),
            Phase::EwGreen => LightState::new(Red, Green),
            Phase::EwYellow => LightState::new(Red, Yellow),
        }
    }

    /// The axis that holds right of way, if any
    pub fn axis(self) -> Option<Axis> {
        match self {
            Phase::Stopped => None,
            Phase::NsGreen | Phase::NsYellow => Some(Axis::NorthSouth),
            Phase::EwGreen | Phase::EwYellow => Some(Axis::EastWest),
        }
    }

    pub fn green_for(axis: Axis) -> Phase {
        match axis {
            Axis::NorthSouth => Phase::NsGreen,
            Axis::EastWest => Phase::EwGreen,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Stopped => "STOPPED",
            Phase::NsGreen => "NS_GREEN",
            Phase::NsYellow => "NS_YELLOW",
            Phase::EwGreen => "EW_GREEN",
            Phase::EwYellow => "EW_YELLOW",
        };
        f.write_str(name)
    }
}

/// Colors shown to the two axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightState {
    pub ns: LightColor,
    pub ew: LightColor,
}

impl LightState {
    fn new(ns: LightColor, ew: LightColor) -> Self {
        Self { ns, ew }
    }

    pub fn color_for(&self, axis: Axis) -> LightColor {
        match axis {
            Axis::NorthSouth => self.ns,
            Axis::EastWest => self.ew,
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Phase::Stopped.light_state()
    }
}

/// Why a green phase was chosen at the end of a yellow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// An emergency vehicle claimed its axis
    Emergency(VehicleId),
    /// Smart mode found a demand imbalance
    Demand,
    /// Default alternation to the other axis
    Alternation,
}

/// Outcome of the phase decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub phase: Phase,
    pub reason: DecisionReason,
}

/// Demand lead an axis needs before smart mode favors it
pub const SMART_DEMAND_MARGIN: usize = 2;

/// Choose the next green phase as `ending` (a yellow phase) finishes
///
/// Emergency preemption beats smart demand, which beats alternation.
pub fn decide(ending: Phase, sensors: &SensorReading, mode: Mode) -> Decision {
    if let Some((vehicle_id, axis)) = sensors.first_emergency {
        return Decision {
            phase: Phase::green_for(axis),
            reason: DecisionReason::Emergency(vehicle_id),
        };
    }

    if mode == Mode::Smart {
        if sensors.ns_count > sensors.ew_count + SMART_DEMAND_MARGIN {
            return Decision {
                phase: Phase::NsGreen,
                reason: DecisionReason::Demand,
            };
        }
        if sensors.ew_count > sensors.ns_count + SMART_DEMAND_MARGIN {
            return Decision {
                phase: Phase::EwGreen,
                reason: DecisionReason::Demand,
            };
        }
    }

    let next_axis = match ending.axis() {
        Some(Axis::NorthSouth) => Axis::EastWest,
        _ => Axis::NorthSouth,
    };
    Decision {
        phase: Phase::green_for(next_axis),
        reason: DecisionReason::Alternation,
    }
}

/// A completed phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Set when the change came out of `decide`
    pub decision: Option<DecisionReason>,
}

/// Timed state machine for the intersection signals
#[derive(Debug, Clone, Default)]
pub struct PhaseController {
    phase: Phase,
    /// Seconds spent in the current phase
    timer: u32,
}

impl PhaseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn light_state(&self) -> LightState {
        self.phase.light_state()
    }

    /// Leave STOPPED for the initial green; resuming from any other phase keeps the timer
    pub fn start(&mut self) -> Option<PhaseTransition> {
        if self.phase != Phase::Stopped {
            return None;
        }
        Some(self.transition(Phase::NsGreen, None))
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Stopped;
        self.timer = 0;
    }

    /// Advance the timer by one second and apply any due transition
    ///
    /// `sensors` is only consulted when a yellow phase ends.
    pub fn tick<F>(&mut self, settings: &Settings, mode: Mode, sensors: F) -> Option<PhaseTransition>
    where
        F: FnOnce() -> SensorReading,
    {
        if self.phase == Phase::Stopped {
            return None;
        }

        self.timer += 1;

        match self.phase {
            Phase::NsGreen if self.timer >= settings.green_time => {
                Some(self.transition(Phase::NsYellow, None))
            }
            Phase::EwGreen if self.timer >= settings.green_time => {
                Some(self.transition(Phase::EwYellow, None))
            }
            Phase::NsYellow | Phase::EwYellow if self.timer >= settings.yellow_time => {
                let decision = decide(self.phase, &sensors(), mode);
                Some(self.transition(decision.phase, Some(decision.reason)))
            }
            _ => None,
        }
    }

    fn transition(&mut self, to: Phase, decision: Option<DecisionReason>) -> PhaseTransition {
        let from = self.phase;
        self.phase = to;
        self.timer = 0;
        PhaseTransition { from, to, decision }
    }
}
