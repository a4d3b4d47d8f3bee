//! World boundary policies
//!
//! Two policies exist: an elastic circular wall and damped axis-aligned
//! walls. A simulation is configured with exactly one of them.

use super::particle::Particle;
use crate::config::WALL_TANGENT_DAMPING;
use crate::math::{Point, Real, direction_and_length, perpendicular, reflect_about_tangent};

pub trait BoundaryConstraint {
    /// Pull a particle that breached the wall back onto it and reflect its velocity.
    fn apply(&self, particle: &mut Particle);

    /// Whether the whole disc of `particle` lies inside the boundary.
    fn contains(&self, particle: &Particle) -> bool;
}

/// Perfectly elastic circular wall
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularBoundary {
    pub center: Point,
    pub radius: Real,
}

impl BoundaryConstraint for CircularBoundary {
    #[inline]
    fn apply(&self, particle: &mut Particle) {
        // A disc wider than the boundary is pinned to the center
        let limit = (self.radius - particle.radius).max(0.0);
        let to_center = self.center - particle.position;
        // A particle sitting on the center has no usable normal
        let Some((normal, distance)) = direction_and_length(to_center) else {
            return;
        };
        if distance <= limit {
            return;
        }

        let velocity = particle.displacement();
        particle.position = self.center - normal * limit;
        let tangent = perpendicular(normal);
        particle.set_velocity(reflect_about_tangent(velocity, tangent), 1.0);
    }

    #[inline]
    fn contains(&self, particle: &Particle) -> bool {
        particle.position.distance(self.center) <= self.radius - particle.radius
    }
}

/// Axis-aligned walls; the normal component bounces, the tangential one is damped.
///
/// At a corner both components are normal, so both bounce and neither is damped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangularBoundary {
    pub min: Point,
    pub max: Point,
    pub damping: Real,
}

impl RectangularBoundary {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            damping: WALL_TANGENT_DAMPING,
        }
    }
}

impl BoundaryConstraint for RectangularBoundary {
    fn apply(&self, particle: &mut Particle) {
        let low = self.min + particle.radius;
        let high = self.max - particle.radius;
        let position = particle.position;
        let hit_x = position.x < low.x || position.x > high.x;
        let hit_y = position.y < low.y || position.y > high.y;
        if !hit_x && !hit_y {
            return;
        }

        let mut velocity = particle.displacement();
        if hit_x {
            velocity.x = -velocity.x;
        } else {
            velocity.x *= self.damping;
        }
        if hit_y {
            velocity.y = -velocity.y;
        } else {
            velocity.y *= self.damping;
        }

        particle.position = position.clamp(low, high);
        particle.set_velocity(velocity, 1.0);
    }

    fn contains(&self, particle: &Particle) -> bool {
        let low = self.min + particle.radius;
        let high = self.max - particle.radius;
        particle.position.cmpge(low).all() && particle.position.cmple(high).all()
    }
}

/// Boundary descriptor handed to renderers and used by the solver
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary {
    Circle(CircularBoundary),
    Rect(RectangularBoundary),
}

impl Boundary {
    pub fn circle(center: Point, radius: Real) -> Self {
        Self::Circle(CircularBoundary { center, radius })
    }

    pub fn rect(min: Point, max: Point) -> Self {
        Self::Rect(RectangularBoundary::new(min, max))
    }

    pub fn center(&self) -> Point {
        match self {
            Self::Circle(circle) => circle.center,
            Self::Rect(rect) => (rect.min + rect.max) * 0.5,
        }
    }

    /// Center and radius when this is a circular boundary
    pub fn as_circle(&self) -> Option<(Point, Real)> {
        match self {
            Self::Circle(circle) => Some((circle.center, circle.radius)),
            Self::Rect(_) => None,
        }
    }
}

impl BoundaryConstraint for Boundary {
    #[inline]
    fn apply(&self, particle: &mut Particle) {
        match self {
            Self::Circle(circle) => circle.apply(particle),
            Self::Rect(rect) => rect.apply(particle),
        }
    }

    #[inline]
    fn contains(&self, particle: &Particle) -> bool {
        match self {
            Self::Circle(circle) => circle.contains(particle),
            Self::Rect(rect) => rect.contains(particle),
        }
    }
}

pub fn apply_boundary(boundary: &impl BoundaryConstraint, particles: &mut [Particle]) {
    for particle in particles.iter_mut() {
        boundary.apply(particle);
    }
}
