//! Configuration and parameters
//!
//! Constants, simulation settings and spawner settings.

pub mod constants;
pub mod sim_params;

pub use constants::*;
pub use sim_params::*;
