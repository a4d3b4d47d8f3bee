pub mod boundary;
pub mod collision;
pub mod forces;
pub mod particle;
pub mod simulation;
pub mod spatial_index;

pub use boundary::{
    Boundary, BoundaryConstraint, CircularBoundary, RectangularBoundary, apply_boundary,
};
pub use collision::{CollisionResponse, HALF_STENCIL, resolve_collisions, resolve_pair};
pub use forces::{GravityDirection, RadialForceMode, radial_acceleration};
pub use particle::{Particle, ParticleId};
pub use simulation::Simulation;
pub use spatial_index::{PackedCell, SpatialIndex};
