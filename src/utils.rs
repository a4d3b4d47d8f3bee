//! Small numeric helpers shared by the solver stages

/// Exact zero check inverse (prevents NaN from division by zero)
#[inline(always)]
pub fn inv_exact(e: f32) -> f32 {
    if e == 0.0 { 0.0 } else { 1.0 / e }
}

/// Check if particle properties make sense
pub mod check {
    use bevy::math::Vec2;

    #[inline]
    pub fn radius_ok(radius: f32) -> bool {
        radius > 0.0 && radius.is_finite()
    }

    #[inline]
    pub fn position_ok(position: Vec2) -> bool {
        position.is_finite()
    }

    /// Time deltas and lengths must be finite and strictly positive
    #[inline]
    pub fn positive_ok(value: f32) -> bool {
        value > 0.0 && value.is_finite()
    }
}
