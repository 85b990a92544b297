//! Intersection Simulation Library
//!
//! A single four-way intersection with an adaptive traffic-light controller.
//! The engine is headless; rendering layers read snapshots and issue commands.

pub mod simulation;
