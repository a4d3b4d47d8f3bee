use bevy::prelude::*;

use super::constants::*;
use crate::core::{Boundary, CollisionResponse};
use crate::math::{Real, Vector};
use crate::utils::check;

/// Parameters owned by a single [`Simulation`](crate::Simulation).
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Duration of one `step()` call in seconds
    pub frame_dt: Real,

    /// Number of sub-steps a frame is split into (>= 1)
    pub sub_steps: u32,

    /// Width of the square broad phase cells. Should be at least twice the
    /// largest particle radius or contacts across two cells are missed.
    pub cell_size: Real,

    /// Magnitude of the gravity vector for any non-zero direction
    pub gravity_magnitude: Real,

    pub boundary: Boundary,

    pub collision_response: CollisionResponse,

    /// Radial force gain (k) and reach (R) for pull / push commands
    pub force_strength: Real,
    pub force_radius: Real,

    /// Acceleration stored in a freshly created particle
    pub initial_acceleration: Vector,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_dt: FRAME_DT,
            sub_steps: DEFAULT_SUB_STEPS,
            cell_size: CELL_SIZE,
            gravity_magnitude: GRAVITY_MAGNITUDE,
            boundary: Boundary::circle(BOUNDARY_CENTER, BOUNDARY_RADIUS),
            collision_response: CollisionResponse::MassWeighted,
            force_strength: FORCE_STRENGTH,
            force_radius: FORCE_RADIUS,
            initial_acceleration: Vector::ZERO,
        }
    }
}

impl SimulationConfig {
    /// Time delta used by each sub-step
    #[inline]
    pub fn sub_step_dt(&self) -> Real {
        self.frame_dt / self.sub_steps as Real
    }

    pub fn with_sub_steps(mut self, sub_steps: u32) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    pub fn with_frame_dt(mut self, frame_dt: Real) -> Self {
        if check::positive_ok(frame_dt) {
            self.frame_dt = frame_dt;
        }
        self
    }

    pub fn with_cell_size(mut self, cell_size: Real) -> Self {
        if check::positive_ok(cell_size) {
            self.cell_size = cell_size;
        }
        self
    }

    pub fn with_gravity_magnitude(mut self, magnitude: Real) -> Self {
        self.gravity_magnitude = magnitude;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_collision_response(mut self, response: CollisionResponse) -> Self {
        self.collision_response = response;
        self
    }

    pub fn with_radial_force(mut self, strength: Real, radius: Real) -> Self {
        self.force_strength = strength;
        self.force_radius = radius;
        self
    }

    pub fn with_initial_acceleration(mut self, acceleration: Vector) -> Self {
        self.initial_acceleration = acceleration;
        self
    }

    /// Seed new particles with the historical {10, 10} acceleration
    pub fn with_legacy_acceleration_seed(self) -> Self {
        self.with_initial_acceleration(LEGACY_ACCELERATION_SEED)
    }

    /// Replace out-of-range values with defaults, warning for each one.
    ///
    /// Fields written directly (instead of through the builders) bypass the
    /// clamping, so [`Simulation::new`](crate::Simulation::new) runs this once.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.sub_steps == 0 {
            warn!("sub_steps must be at least 1, using 1");
            self.sub_steps = 1;
        }
        if !check::positive_ok(self.frame_dt) {
            warn!(
                "frame_dt {} is not a positive finite value, using {}",
                self.frame_dt, defaults.frame_dt
            );
            self.frame_dt = defaults.frame_dt;
        }
        if !check::positive_ok(self.cell_size) {
            warn!(
                "cell_size {} is not a positive finite value, using {}",
                self.cell_size, defaults.cell_size
            );
            self.cell_size = defaults.cell_size;
        }
        if !self.gravity_magnitude.is_finite() {
            warn!("gravity_magnitude is not finite, using {}", defaults.gravity_magnitude);
            self.gravity_magnitude = defaults.gravity_magnitude;
        }
        if !self.initial_acceleration.is_finite() {
            warn!("initial_acceleration is not finite, using zero");
            self.initial_acceleration = Vector::ZERO;
        }

        self
    }
}

/// Emitter settings for the particle spawner
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SpawnerConfig {
    /// No more particles are emitted once the simulation holds this many
    pub max_particles: usize,

    /// Seconds between two emissions
    pub spawn_delay: Real,

    pub position: Vector,

    /// Launch velocity in px/s
    pub velocity: Vector,

    pub min_radius: Real,
    pub max_radius: Real,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            max_particles: MAX_PARTICLES,
            spawn_delay: SPAWN_DELAY,
            position: SPAWN_POSITION,
            velocity: SPAWN_VELOCITY,
            min_radius: MIN_SPAWN_RADIUS,
            max_radius: MAX_SPAWN_RADIUS,
        }
    }
}

impl SpawnerConfig {
    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    pub fn with_spawn_delay(mut self, spawn_delay: Real) -> Self {
        self.spawn_delay = spawn_delay.max(0.0);
        self
    }

    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the radius range; the bounds are swapped if given in reverse order
    pub fn with_radius_range(mut self, min_radius: Real, max_radius: Real) -> Self {
        self.min_radius = min_radius.min(max_radius);
        self.max_radius = min_radius.max(max_radius);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_clamp_invalid_values() {
        let config = SimulationConfig::default()
            .with_sub_steps(0)
            .with_cell_size(-3.0)
            .with_frame_dt(0.0);
        assert_eq!(config.sub_steps, 1);
        assert_eq!(config.cell_size, CELL_SIZE);
        assert_eq!(config.frame_dt, FRAME_DT);
    }

    #[test]
    fn sanitized_repairs_direct_field_writes() {
        let mut config = SimulationConfig::default();
        config.sub_steps = 0;
        config.cell_size = Real::NAN;
        config.initial_acceleration = Vec2::new(Real::INFINITY, 0.0);

        let config = config.sanitized();
        assert_eq!(config.sub_steps, 1);
        assert_eq!(config.cell_size, CELL_SIZE);
        assert_eq!(config.initial_acceleration, Vec2::ZERO);
    }

    #[test]
    fn sub_step_dt_splits_the_frame() {
        let config = SimulationConfig::default().with_sub_steps(4);
        assert!((config.sub_step_dt() - FRAME_DT / 4.0).abs() < 1e-9);
    }

    #[test]
    fn legacy_seed_is_opt_in() {
        assert_eq!(SimulationConfig::default().initial_acceleration, Vec2::ZERO);
        assert_eq!(
            SimulationConfig::default()
                .with_legacy_acceleration_seed()
                .initial_acceleration,
            Vec2::new(10.0, 10.0)
        );
    }

    #[test]
    fn radius_range_is_ordered() {
        let config = SpawnerConfig::default().with_radius_range(9.0, 3.0);
        assert_eq!((config.min_radius, config.max_radius), (3.0, 9.0));
    }
}
