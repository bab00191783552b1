//! Fireworks in the terminal.
//!
//! Shells ([`projectile::Projectile`]) rise from the bottom centre toward a
//! target and burst into forty fading [`spark::Spark`]s. A [`Simulation`]
//! advances everything one tick at a time and draws through the
//! [`surface::Surface`] trait; [`canvas::TerminalCanvas`] is the surface the
//! binary renders with.

pub mod app;
pub mod burst;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod math;
pub mod projectile;
pub mod simulation;
pub mod spark;
pub mod surface;
pub mod trail;

pub use error::{Error, Result};
pub use simulation::{Simulation, SimulationConfig, TickReport};
