//! Reaction-diffusion engine for coupled iron chemistry and bacterial
//! population fields on a square grid.
//!
//! The engine owns a double-buffered grid of [`Cell`]s and advances it one
//! generation at a time with an explicit Euler step: local reaction kinetics,
//! neighbor-coupled diffusion, and gradient-biased movement are evaluated in a
//! single fused pass that reads only the previous generation, so every cell's
//! update is order-independent and the pass parallelizes freely.
//!
//! Stepping cadence is external: [`SimulationController`] exposes `step()` and
//! a running flag, and whatever host loop drives the display decides when to
//! call it.

pub mod controller;
pub mod grid_state;
pub mod initial;
pub mod kernel;
pub mod noise;
pub mod rates;

pub use controller::SimulationController;
pub use ferrosim_common::{Cell, FieldSnapshot, ParameterSet, SimulationConfig};
pub use grid_state::GridState;
