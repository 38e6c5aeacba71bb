//! Simulation systems: physics step, palette ramp, pointer input.

pub mod color_ramp;
pub mod physics;
pub mod pointer;
