//! External accelerations: directional gravity and the cursor force field

use crate::math::{Point, Real, Vector};

/// Gravity state. Screen coordinates, so `Down` is `+y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GravityDirection {
    None,
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl GravityDirection {
    pub fn vector(self, magnitude: Real) -> Vector {
        let unit = match self {
            Self::None => Vector::ZERO,
            Self::Up => Vector::NEG_Y,
            Self::Down => Vector::Y,
            Self::Left => Vector::NEG_X,
            Self::Right => Vector::X,
        };
        unit * magnitude
    }

    /// Selecting the active direction again switches gravity off
    pub fn toggled(self, pressed: GravityDirection) -> GravityDirection {
        if self == pressed { Self::None } else { pressed }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RadialForceMode {
    Pull,
    Push,
}

/// Acceleration felt at `position` from a radial field centered on `point`.
///
/// The magnitude grows linearly with `strength * (radius - distance)` and
/// vanishes outside `radius`. The direction vector is not normalized.
#[inline]
pub fn radial_acceleration(
    point: Point,
    position: Point,
    mode: RadialForceMode,
    strength: Real,
    radius: Real,
) -> Vector {
    let direction = point - position;
    let falloff = strength * (radius - direction.length());
    match mode {
        RadialForceMode::Pull => direction * falloff.max(0.0),
        RadialForceMode::Push => direction * (-falloff).min(0.0),
    }
}
