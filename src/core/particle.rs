//! Circular bodies integrated with position Verlet
//!
//! Velocity is never stored. It is implied by the difference between the
//! current and the previous position, so every velocity change goes through
//! `previous_position`.

use bevy::color::Color;
use bevy::math::IVec2;

use crate::math::{Point, Real, Vector, cell_of, zero_vector};

/// Stable index of a particle inside its owning simulation
pub type ParticleId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub previous_position: Point,
    pub radius: Real,
    /// Accumulated acceleration for the next integration, cleared afterwards
    pub acceleration: Vector,
    /// Display only
    pub color: Color,
    /// Grid cell cached by the last `integrate` / `update_cell`
    pub cell: IVec2,
}

impl Particle {
    /// A particle at rest at `position`
    pub fn new(position: Point, radius: Real) -> Self {
        Self {
            position,
            previous_position: position,
            radius,
            acceleration: zero_vector(),
            color: Color::WHITE,
            cell: IVec2::ZERO,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vector) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Advance one step of length `dt` and refresh the cached cell.
    ///
    /// The caller moves the particle between spatial index buckets when the
    /// returned cell differs from the previous one.
    #[inline]
    pub fn integrate(&mut self, dt: Real, cell_size: Real) -> IVec2 {
        let displacement = self.position - self.previous_position;
        self.previous_position = self.position;
        self.position += displacement + self.acceleration * (dt * dt);
        self.acceleration = zero_vector();
        self.update_cell(cell_size)
    }

    #[inline]
    pub fn update_cell(&mut self, cell_size: Real) -> IVec2 {
        self.cell = cell_of(self.position, cell_size);
        self.cell
    }

    /// Accumulate an acceleration; several calls per step superpose.
    #[inline(always)]
    pub fn accelerate(&mut self, acceleration: Vector) {
        self.acceleration += acceleration;
    }

    /// Overwrite the implied velocity without moving the particle.
    #[inline(always)]
    pub fn set_velocity(&mut self, velocity: Vector, dt: Real) {
        self.previous_position = self.position - velocity * dt;
    }

    #[inline(always)]
    pub fn add_velocity(&mut self, velocity: Vector, dt: Real) {
        self.previous_position -= velocity * dt;
    }

    /// Position change over the last step
    #[inline(always)]
    pub fn displacement(&self) -> Vector {
        self.position - self.previous_position
    }

    #[inline(always)]
    pub fn velocity(&self, dt: Real) -> Vector {
        self.displacement() / dt
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.previous_position.is_finite()
            && self.acceleration.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    const DT: Real = 1.0 / 60.0;

    #[test]
    fn particle_at_rest_stays_put() {
        let mut particle = Particle::new(Vec2::new(5.0, 7.0), 1.0);
        for _ in 0..100 {
            particle.integrate(DT, 10.0);
        }
        assert_eq!(particle.position, Vec2::new(5.0, 7.0));
        assert_eq!(particle.displacement(), Vec2::ZERO);
    }

    #[test]
    fn integration_consumes_acceleration() {
        let mut particle = Particle::new(Vec2::ZERO, 1.0);
        particle.accelerate(Vec2::new(0.0, 60.0));
        particle.accelerate(Vec2::new(0.0, 60.0));
        particle.integrate(DT, 10.0);

        let expected = 120.0 * DT * DT;
        assert!((particle.position.y - expected).abs() < 1e-6);
        assert_eq!(particle.previous_position, Vec2::ZERO);
        assert_eq!(particle.acceleration, Vec2::ZERO);

        // Momentum carries the particle on with no further acceleration
        particle.integrate(DT, 10.0);
        assert!((particle.position.y - 2.0 * expected).abs() < 1e-6);
    }

    #[test]
    fn set_velocity_keeps_position() {
        let mut particle = Particle::new(Vec2::new(1.0, 1.0), 1.0);
        particle.set_velocity(Vec2::new(120.0, 0.0), DT);
        assert_eq!(particle.position, Vec2::new(1.0, 1.0));
        assert!((particle.velocity(DT).x - 120.0).abs() < 1e-3);

        particle.add_velocity(Vec2::new(0.0, -60.0), DT);
        let velocity = particle.velocity(DT);
        assert!((velocity.x - 120.0).abs() < 1e-3);
        assert!((velocity.y + 60.0).abs() < 1e-3);
    }

    #[test]
    fn integrate_reports_new_cell() {
        let mut particle = Particle::new(Vec2::new(19.0, 5.0), 1.0);
        particle.set_velocity(Vec2::new(2.0, 0.0), 1.0);
        let cell = particle.integrate(DT, 20.0);
        assert_eq!(cell, IVec2::new(1, 0));
        assert_eq!(particle.cell, cell);
    }

    #[test]
    fn nan_is_reported_as_unhealthy() {
        let mut particle = Particle::new(Vec2::ZERO, 1.0);
        assert!(particle.is_finite());
        particle.position.x = Real::NAN;
        assert!(!particle.is_finite());
    }
}
