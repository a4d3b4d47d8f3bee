use bevy::prelude::*;

use crate::command::{SimCommand, SpawnRequest};
use crate::config::{DEFAULT_RADIUS, SimulationConfig};
use crate::math::{Point, Real, Vector};
use crate::utils::check;

use super::boundary::{Boundary, apply_boundary};
use super::collision::resolve_collisions;
use super::forces::{GravityDirection, RadialForceMode, radial_acceleration};
use super::particle::{Particle, ParticleId};
use super::spatial_index::SpatialIndex;

/// Aggregate simulation state: particles, broad phase, gravity and boundary.
///
/// Particles are stored append-only, so a [`ParticleId`] stays valid for the
/// lifetime of the simulation.
#[derive(Resource, Clone, Debug)]
pub struct Simulation {
    particles: Vec<Particle>,
    index: SpatialIndex,
    config: SimulationConfig,
    gravity: GravityDirection,
    pending_spawns: Vec<SpawnRequest>,
    frame: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let config = config.sanitized();
        Self {
            particles: Vec::new(),
            index: SpatialIndex::new(config.cell_size),
            config,
            gravity: GravityDirection::default(),
            pending_spawns: Vec::new(),
            frame: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn boundary(&self) -> &Boundary {
        &self.config.boundary
    }

    pub fn gravity(&self) -> GravityDirection {
        self.gravity
    }

    pub fn gravity_vector(&self) -> Vector {
        self.gravity.vector(self.config.gravity_magnitude)
    }

    pub fn set_gravity(&mut self, direction: GravityDirection) {
        self.gravity = direction;
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn sub_step_dt(&self) -> Real {
        self.config.sub_step_dt()
    }

    /// Number of completed `step()` calls
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn pending_spawn_count(&self) -> usize {
        self.pending_spawns.len()
    }

    /// Create a particle at rest and register it in the broad phase.
    pub fn add_particle(&mut self, position: Point, radius: Real) -> ParticleId {
        let radius = if check::radius_ok(radius) {
            radius
        } else {
            warn!("invalid particle radius {radius}, using {DEFAULT_RADIUS}");
            DEFAULT_RADIUS
        };
        if 2.0 * radius > self.index.cell_size() {
            warn!(
                "particle radius {radius} exceeds half the cell size {}, contacts may be missed",
                self.index.cell_size()
            );
        }
        if let Some((_, boundary_radius)) = self.config.boundary.as_circle() {
            if radius > boundary_radius {
                warn!("particle radius {radius} exceeds the boundary radius {boundary_radius}");
            }
        }
        let position = if check::position_ok(position) {
            position
        } else {
            let anchor = self.config.boundary.center();
            warn!("non-finite spawn position {position}, using {anchor}");
            anchor
        };

        let id = self.particles.len();
        let mut particle =
            Particle::new(position, radius).with_acceleration(self.config.initial_acceleration);
        let cell = particle.update_cell(self.index.cell_size());
        self.index.insert(id, cell);
        self.particles.push(particle);
        id
    }

    pub fn spawn(&mut self, request: SpawnRequest) -> ParticleId {
        let id = self.add_particle(request.position, request.radius);
        if let Some(color) = request.color {
            self.particles[id].color = color;
        }
        if let Some(velocity) = request.velocity {
            self.set_particle_velocity(id, velocity);
        }
        id
    }

    /// Defer a spawn to the start of the next `step()`
    pub fn queue_spawn(&mut self, request: SpawnRequest) {
        self.pending_spawns.push(request);
    }

    /// Assign a velocity in px/s, measured over one sub-step.
    pub fn set_particle_velocity(&mut self, id: ParticleId, velocity: Vector) -> bool {
        let dt = self.sub_step_dt();
        match self.particles.get_mut(id) {
            Some(particle) => {
                particle.set_velocity(velocity, dt);
                true
            }
            None => false,
        }
    }

    /// Accelerate every particle toward (pull) or away from (push) `point`.
    ///
    /// One-shot: the acceleration is consumed by the first sub-step of the
    /// next `step()`, so callers repeat it every frame the input is held.
    pub fn apply_radial_force(&mut self, point: Point, mode: RadialForceMode) {
        if !check::position_ok(point) {
            return;
        }
        let strength = self.config.force_strength;
        let radius = self.config.force_radius;
        for particle in self.particles.iter_mut() {
            particle.accelerate(radial_acceleration(
                point,
                particle.position,
                mode,
                strength,
                radius,
            ));
        }
    }

    pub fn apply(&mut self, command: SimCommand) {
        match command {
            SimCommand::Spawn(request) => self.queue_spawn(request),
            SimCommand::RadialForce { point, mode } => self.apply_radial_force(point, mode),
            SimCommand::SetGravity(direction) => self.set_gravity(direction),
        }
    }

    /// Advance one frame: queued spawns, then `sub_steps` rounds of
    /// gravity, collisions, boundary and integration.
    pub fn step(&mut self) {
        for request in std::mem::take(&mut self.pending_spawns) {
            self.spawn(request);
        }

        let dt = self.sub_step_dt();
        let mut contacts = 0;
        for _ in 0..self.config.sub_steps {
            self.apply_gravity();
            contacts += resolve_collisions(
                &mut self.particles,
                &self.index,
                self.config.collision_response,
            );
            apply_boundary(&self.config.boundary, &mut self.particles);
            self.integrate_particles(dt);
        }
        self.frame += 1;

        debug!(
            "frame {}: {} particles, {} contacts, {} cells",
            self.frame,
            self.particles.len(),
            contacts,
            self.index.len()
        );

        let unhealthy = self.non_finite_particles();
        if unhealthy > 0 {
            warn!("frame {}: {unhealthy} particles have non-finite state", self.frame);
        }
    }

    fn apply_gravity(&mut self) {
        let gravity = self.gravity_vector();
        for particle in self.particles.iter_mut() {
            particle.accelerate(gravity);
        }
    }

    fn integrate_particles(&mut self, dt: Real) {
        let cell_size = self.index.cell_size();
        for (id, particle) in self.particles.iter_mut().enumerate() {
            let old_cell = particle.cell;
            let new_cell = particle.integrate(dt, cell_size);
            self.index.relocate(id, old_cell, new_cell);
        }
    }

    /// Discard incremental bookkeeping and re-bucket every particle.
    pub fn rebuild_index(&mut self) {
        self.index.rebuild(&mut self.particles);
    }

    pub fn non_finite_particles(&self) -> usize {
        self.particles.iter().filter(|particle| !particle.is_finite()).count()
    }
}
