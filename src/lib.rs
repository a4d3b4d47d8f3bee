//! 2D Verlet particle simulation
//!
//! Circular particles integrated with position Verlet, confined by a
//! boundary and separated on contact through a uniform grid broad phase.
//! [`Simulation`] is plain data and can be driven directly; [`VerletPlugin`]
//! steps it on bevy's fixed schedule.

pub mod command;
pub mod config;
pub mod core;
pub mod math;
pub mod plugin;
pub mod spawner;
pub mod utils;

// Public re-exports for clean API
pub use command::{SimCommand, SpawnRequest};
pub use config::{SimulationConfig, SpawnerConfig};
pub use crate::core::{
    Boundary, BoundaryConstraint, CollisionResponse, GravityDirection, Particle, ParticleId,
    RadialForceMode, Simulation,
};
pub use plugin::{VerletPlugin, emit_particles, step_simulation};
pub use spawner::{Spawner, spectrum_color};
