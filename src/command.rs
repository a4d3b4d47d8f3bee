//! Discrete requests from the input side of the application

use bevy::color::Color;

use crate::core::{GravityDirection, RadialForceMode};
use crate::math::{Point, Real, Vector};

/// A particle to be created, optionally launched and colored
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub position: Point,
    pub radius: Real,
    /// Launch velocity in px/s
    pub velocity: Option<Vector>,
    pub color: Option<Color>,
}

impl SpawnRequest {
    pub fn new(position: Point, radius: Real) -> Self {
        Self {
            position,
            radius,
            velocity: None,
            color: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Launch along `angle` (radians, screen coordinates) at `speed` px/s
    pub fn with_launch_angle(self, angle: Real, speed: Real) -> Self {
        self.with_velocity(Vector::from_angle(angle) * speed)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SimCommand {
    Spawn(SpawnRequest),
    RadialForce { point: Point, mode: RadialForceMode },
    SetGravity(GravityDirection),
}

impl SimCommand {
    pub fn pull(point: Point) -> Self {
        Self::RadialForce {
            point,
            mode: RadialForceMode::Pull,
        }
    }

    pub fn push(point: Point) -> Self {
        Self::RadialForce {
            point,
            mode: RadialForceMode::Push,
        }
    }
}
