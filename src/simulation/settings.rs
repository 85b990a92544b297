//! Operator-configurable policy for the intersection
//!
//! Bounds mirror the ranges offered to operators; values outside them are rejected.

use anyhow::{bail, ensure, Result};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Allowed green phase durations in seconds
pub const GREEN_TIME_RANGE: RangeInclusive<u32> = 5..=30;

/// Allowed yellow phase durations in seconds
pub const YELLOW_TIME_RANGE: RangeInclusive<u32> = 2..=8;

/// Allowed vehicle frequency levels
pub const VEHICLE_FREQ_RANGE: RangeInclusive<u32> = 1..=10;

pub const DEFAULT_GREEN_TIME: u32 = 15;
pub const DEFAULT_YELLOW_TIME: u32 = 3;
pub const DEFAULT_VEHICLE_FREQ: u32 = 5;

/// Spawn interval bounds in milliseconds
pub const BASE_SPAWN_INTERVAL_MS: u64 = 3000;
pub const MIN_SPAWN_INTERVAL_MS: u64 = 500;
pub const SPAWN_INTERVAL_STEP_MS: u64 = 200;

/// Signal timing and traffic volume settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Green duration in seconds
    pub green_time: u32,
    /// Yellow duration in seconds
    pub yellow_time: u32,
    /// Spawn frequency level, higher spawns more often
    pub vehicle_freq: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            green_time: DEFAULT_GREEN_TIME,
            yellow_time: DEFAULT_YELLOW_TIME,
            vehicle_freq: DEFAULT_VEHICLE_FREQ,
        }
    }
}

impl Settings {
    /// Create validated settings
    pub fn new(green_time: u32, yellow_time: u32, vehicle_freq: u32) -> Result<Self> {
        let settings = Self {
            green_time,
            yellow_time,
            vehicle_freq,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            GREEN_TIME_RANGE.contains(&self.green_time),
            "green time {}s outside {:?}",
            self.green_time,
            GREEN_TIME_RANGE
        );
        ensure!(
            YELLOW_TIME_RANGE.contains(&self.yellow_time),
            "yellow time {}s outside {:?}",
            self.yellow_time,
            YELLOW_TIME_RANGE
        );
        ensure!(
            VEHICLE_FREQ_RANGE.contains(&self.vehicle_freq),
            "vehicle frequency {} outside {:?}",
            self.vehicle_freq,
            VEHICLE_FREQ_RANGE
        );
        Ok(())
    }

    /// Milliseconds between spawn attempts
    pub fn spawn_interval_ms(&self) -> u64 {
        let reduction = self.vehicle_freq as u64 * SPAWN_INTERVAL_STEP_MS;
        BASE_SPAWN_INTERVAL_MS
            .saturating_sub(reduction)
            .max(MIN_SPAWN_INTERVAL_MS)
    }
}

/// Controller operating mode
///
/// Only `Smart` changes how the next green phase is chosen. The other
/// modes are accepted and currently behave like plain alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Normal,
    Rush,
    #[default]
    Smart,
    Manual,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "normal",
            Mode::Rush => "rush",
            Mode::Smart => "smart",
            Mode::Manual => "manual",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "rush" => Ok(Mode::Rush),
            "smart" => Ok(Mode::Smart),
            "manual" => Ok(Mode::Manual),
            other => bail!("unknown mode '{}' (expected normal, rush, smart or manual)", other),
        }
    }
}
